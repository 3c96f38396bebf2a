//! Error types for the avoider

use thiserror::Error;

/// Avoider errors
#[derive(Debug, Error)]
pub enum AvoiderError {
    /// A setting that must be strictly positive and finite was not
    #[error("{field} must be positive and finite (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    /// A setting that must be finite and not negative was not
    #[error("{field} must be finite and not negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    /// An encounter was built without one of its collaborators
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for avoider operations
pub type Result<T> = std::result::Result<T, AvoiderError>;

/// Reject zero, negative, infinite and NaN values
pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AvoiderError::NonPositive { field, value })
    }
}

/// Reject negative, infinite and NaN values
pub(crate) fn ensure_non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AvoiderError::Negative { field, value })
    }
}
