use reqwest::Client;
use std::env;
use thiserror::Error;

use super::endpoints::{ChatCompletionRequest, ChatCompletionResponse, Provider};
use crate::config::{EngineConfig, DEFAULT_API_URL};

#[derive(Debug, Error)]
pub enum ApiConnectionError {
    #[error("API key not found in environment: {0}")]
    MissingApiKey(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("API error {status}: {error_body}")]
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
}

impl ApiConnectionError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiConnectionError::NetworkError(err) if err.is_timeout())
    }
}

impl Provider {
    pub fn openrouter(api_key_env_var_name: &str) -> Self {
        Self::OpenRouter {
            api_key: api_key_env_var_name.to_string(),
            url: DEFAULT_API_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Builds a provider whose HTTP client enforces the configured timeout.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ApiConnectionError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::OpenRouter {
            api_key: config.api_key_env_var.clone(),
            url: config.api_url.clone(),
            client,
        })
    }

    pub async fn call_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ApiConnectionError> {
        match self {
            Provider::OpenRouter {
                api_key: api_key_env_var_name,
                url,
                client,
            } => {
                let actual_api_key = env::var(api_key_env_var_name)
                    .map_err(|_| ApiConnectionError::MissingApiKey(api_key_env_var_name.clone()))?;

                let app_name =
                    env::var("APP_NAME").unwrap_or_else(|_| "NutritionEngine".to_string());

                tracing::debug!(model = %request.model, %url, "sending chat completion request");

                let response = client
                    .post(url)
                    .bearer_auth(actual_api_key)
                    .header("X-Title", app_name)
                    .json(request)
                    .send()
                    .await?;

                if response.status().is_success() {
                    let chat_response = response.json::<ChatCompletionResponse>().await?;
                    Ok(chat_response)
                } else {
                    let status = response.status();
                    let error_body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to read error body".to_string());
                    Err(ApiConnectionError::ApiError { status, error_body })
                }
            }
        }
    }
}
