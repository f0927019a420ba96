use dotenv::dotenv;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";
pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "qwen/qwen3-32b";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TEMPERATURE: f32 = 0.4;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

const API_KEY_VAR_VAR: &str = "NUTRITION_API_KEY_VAR";
const API_URL_VAR: &str = "NUTRITION_API_URL";
const MODEL_VAR: &str = "NUTRITION_MODEL";
const TIMEOUT_VAR: &str = "NUTRITION_TIMEOUT_SECS";
const TEMPERATURE_VAR: &str = "NUTRITION_TEMPERATURE";
const BIND_ADDR_VAR: &str = "NUTRITION_BIND_ADDR";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}' ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Runtime settings for the engine and its HTTP surface.
///
/// The API key itself is not stored here: only the name of the environment
/// variable holding it, which is read at call time.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub api_key_env_var: String,
    pub api_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub bind_addr: SocketAddr,
}

impl EngineConfig {
    /// Loads `.env` (if present) and then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(var) = lookup(API_KEY_VAR_VAR).filter(|v| !v.trim().is_empty()) {
            config.api_key_env_var = var.trim().to_string();
        }
        if let Some(url) = lookup(API_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config.api_url = url.trim().to_string();
        }
        if let Some(model) = lookup(MODEL_VAR).filter(|v| !v.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            config.timeout_secs = match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: TIMEOUT_VAR,
                        value: raw,
                        reason: "expected a positive number of seconds",
                    })
                }
            };
        }
        if let Some(raw) = lookup(TEMPERATURE_VAR) {
            config.temperature = match raw.trim().parse::<f32>() {
                Ok(t) if (0.0..=2.0).contains(&t) => t,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: TEMPERATURE_VAR,
                        value: raw,
                        reason: "expected a number between 0.0 and 2.0",
                    })
                }
            };
        }
        if let Some(raw) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: BIND_ADDR_VAR,
                value: raw.clone(),
                reason: "expected host:port",
            })?;
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_key_env_var: DEFAULT_API_KEY_ENV_VAR.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            temperature: DEFAULT_TEMPERATURE,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}
