use thiserror::Error;

use crate::generation::GenerationError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed or incomplete request data. Surfaced to callers as HTTP 400.
    #[error("{message}")]
    Validation {
        message: String,
        missing_fields: Vec<String>,
    },

    /// External content service failure. The meal planner absorbs these with
    /// fallbacks, so they only escape from lower-level calls.
    #[error("Content generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// Unexpected failure. Callers see a generic message; detail is logged.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EngineError {
    pub fn invalid(message: impl Into<String>) -> Self {
        EngineError::Validation {
            message: message.into(),
            missing_fields: Vec::new(),
        }
    }

    pub fn missing_fields(fields: Vec<String>) -> Self {
        EngineError::Validation {
            message: format!("Missing required profile fields: {}", fields.join(", ")),
            missing_fields: fields,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
