pub mod client;
pub mod content;

// Public API exports
pub use client::{
    ModelConfig, OpenRouterClient, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
pub use content::{ContentProvider, OpenRouterProvider};
