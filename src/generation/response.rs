use serde::de::DeserializeOwned;

use super::GenerationError;

/// Removes a surrounding markdown code fence (```json ... ``` or ``` ... ```).
/// Models asked for bare JSON still wrap it from time to time.
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    if !(trimmed.starts_with("```") && trimmed.ends_with("```") && trimmed.len() >= 6) {
        return trimmed;
    }
    let inner = &trimmed[3..trimmed.len() - 3];
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.trim()
}

pub fn parse_json_content<T: DeserializeOwned>(content: &str) -> Result<T, GenerationError> {
    let json = strip_code_fences(content);
    if json.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    serde_json::from_str(json).map_err(|e| {
        tracing::debug!(error = %e, content = json, "generated content failed to deserialize");
        GenerationError::Parse(e)
    })
}
