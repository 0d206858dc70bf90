use crate::navigation::View;
use thiserror::Error;

/// The content provider cannot be used at all until the environment is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("OPENROUTER_API_KEY is not set")]
    MissingApiKey,

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("Failed to create OpenRouter client: {0}")]
    Client(String),
}

/// A single content request failed. Network, auth and parse failures all
/// collapse into this type; callers only distinguish "it worked" from "retry".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("OpenRouter API error: {0}")]
    Request(String),

    #[error("No response choices received")]
    EmptyResponse,

    #[error("Malformed content: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("cannot {action} from the {from:?} view")]
    InvalidTransition { from: View, action: &'static str },
}
