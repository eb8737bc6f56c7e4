/// Convenience result type used across the crate.
pub type TeamColorResult<T> = Result<T, TeamColorError>;

/// Top-level error taxonomy used by compositing and session APIs.
#[derive(thiserror::Error, Debug)]
pub enum TeamColorError {
    /// Invalid caller-provided data (dimensions, buffer lengths, colors, names).
    #[error("validation error: {0}")]
    Validation(String),

    /// An operation needing one or more buffers was invoked without them.
    #[error("missing input: {0}")]
    InputMissing(String),

    /// Errors when parsing preset files or other serialized data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TeamColorError {
    /// Build a [`TeamColorError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TeamColorError::InputMissing`] value.
    pub fn input_missing(msg: impl Into<String>) -> Self {
        Self::InputMissing(msg.into())
    }

    /// Build a [`TeamColorError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
