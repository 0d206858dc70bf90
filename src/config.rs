use crate::ai::{ModelConfig, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const MODEL_VAR: &str = "CLOUDMASTER_MODEL";
pub const TEMPERATURE_VAR: &str = "CLOUDMASTER_TEMPERATURE";
pub const MAX_TOKENS_VAR: &str = "CLOUDMASTER_MAX_TOKENS";

/// Runtime settings read from the environment at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: ModelConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).filter(|k| !k.trim().is_empty());

        let model = lookup(MODEL_VAR)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = match lookup(TEMPERATURE_VAR) {
            Some(raw) => {
                let value: f32 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    name: TEMPERATURE_VAR,
                    value: raw.clone(),
                })?;
                if !(0.0..=2.0).contains(&value) {
                    return Err(ConfigError::Invalid {
                        name: TEMPERATURE_VAR,
                        value: raw,
                    });
                }
                value
            }
            None => DEFAULT_TEMPERATURE,
        };

        let max_tokens = match lookup(MAX_TOKENS_VAR) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: MAX_TOKENS_VAR,
                value: raw.clone(),
            })?,
            None => DEFAULT_MAX_TOKENS,
        };

        Ok(Self {
            api_key,
            model: ModelConfig {
                model,
                temperature: Some(temperature),
                max_tokens: Some(max_tokens),
            },
        })
    }

    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}
