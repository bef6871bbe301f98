pub(crate) mod curve;
pub(crate) mod helix;
pub(crate) mod noise;
