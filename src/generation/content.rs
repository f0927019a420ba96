use async_trait::async_trait;
use std::time::Duration;

use super::GenerationError;
use crate::api_connection::{
    ChatCompletionRequest, ChatMessage, JsonSchemaDefinition, Provider, ResponseFormat,
};
use crate::config::EngineConfig;

/// A structured prompt for the generative content service.
#[derive(Debug, Clone)]
pub struct ContentRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    /// Response shape the service is asked to honour.
    pub schema: JsonSchemaDefinition,
    pub max_tokens: u32,
}

/// Capability interface over any text-generation backend that can return JSON.
///
/// Implementations return the raw JSON text; validating it against the
/// expected shape is the caller's job.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_json(&self, request: ContentRequest) -> Result<String, GenerationError>;
}

/// [`ContentGenerator`] backed by an OpenAI-compatible chat completion API.
#[derive(Debug, Clone)]
pub struct OpenRouterGenerator {
    provider: Provider,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl OpenRouterGenerator {
    pub fn new(provider: Provider, model: impl Into<String>, temperature: f32, timeout: Duration) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            timeout,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, GenerationError> {
        let provider = Provider::from_config(config)?;
        Ok(Self::new(
            provider,
            config.model.clone(),
            config.temperature,
            config.timeout(),
        ))
    }
}

#[async_trait]
impl ContentGenerator for OpenRouterGenerator {
    async fn generate_json(&self, request: ContentRequest) -> Result<String, GenerationError> {
        let chat_request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(request.system_prompt),
                ChatMessage::user(request.user_prompt),
            ],
            response_format: Some(ResponseFormat::json_schema(request.schema)),
            temperature: Some(self.temperature),
            max_tokens: Some(request.max_tokens),
        };

        let response = tokio::time::timeout(
            self.timeout,
            self.provider.call_chat_completion(&chat_request),
        )
        .await
        .map_err(|_| GenerationError::Timeout(self.timeout))?
        .map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout(self.timeout)
            } else {
                GenerationError::Connection(e)
            }
        })?;

        match response.first_content() {
            Some(content) if !content.trim().is_empty() => Ok(content.to_string()),
            _ => Err(GenerationError::EmptyResponse),
        }
    }
}
