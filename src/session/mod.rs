pub(crate) mod helix_session;
