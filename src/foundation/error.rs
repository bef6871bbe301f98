/// Convenience result type used across helixflow.
pub type HelixResult<T> = Result<T, HelixError>;

/// Top-level error taxonomy used by engine APIs.
///
/// `Configuration`, `NotFound`, and `NotReady` are programmer errors: they surface immediately
/// and are never retried or swallowed by the engine.
#[derive(thiserror::Error, Debug)]
pub enum HelixError {
    /// A pipeline definition referenced a transformer that is not registered.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A pipeline name was never defined.
    #[error("not found: {0}")]
    NotFound(String),

    /// The scheduler was driven before any pipeline was activated.
    #[error("not ready: {0}")]
    NotReady(String),

    /// Invalid user-provided configuration or collaborator input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HelixError {
    /// Build a [`HelixError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`HelixError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`HelixError::NotReady`] value.
    pub fn not_ready(msg: impl Into<String>) -> Self {
        Self::NotReady(msg.into())
    }

    /// Build a [`HelixError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HelixError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
