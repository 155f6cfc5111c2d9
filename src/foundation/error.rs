/// Convenience result type used across Backdrop.
pub type BackdropResult<T> = Result<T, BackdropError>;

/// Top-level error taxonomy used by the preview core.
#[derive(thiserror::Error, Debug)]
pub enum BackdropError {
    /// Invalid user-provided or persisted data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A pixel source could not be resolved or decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors when serializing or deserializing session data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BackdropError {
    /// Build a [`BackdropError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BackdropError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`BackdropError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for BackdropError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
