use std::time::Duration;
use thiserror::Error;

use crate::api_connection::ApiConnectionError;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Generation service request failed: {0}")]
    Connection(#[from] ApiConnectionError),

    #[error("Generation service timed out after {0:?}")]
    Timeout(Duration),

    #[error("Generation service returned no content")]
    EmptyResponse,

    #[error("Generated content did not match the expected shape: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Generated content failed validation: {0}")]
    Invalid(String),
}
