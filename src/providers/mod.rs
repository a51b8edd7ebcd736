// src/providers/mod.rs

use async_trait::async_trait;
use thiserror::Error;

use crate::config::API_KEY_VAR;

/// Every way a single upstream completion call can fail.
///
/// `Display` renders the message returned to the caller.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    #[error("{} is not set on the server", API_KEY_VAR)]
    MissingCredential,

    #[error("Upstream model API timed out. Please try again.")]
    Timeout,

    /// Detail is kept for logs only.
    #[error("Cannot reach model API (network error).")]
    Unreachable(String),

    #[error(
        "Model API error: {}\n{}",
        .status.map_or_else(|| "unknown".to_string(), |code| code.to_string()),
        .detail
    )]
    Http { status: Option<u16>, detail: String },
}

impl ProviderError {
    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::MissingCredential => "missing_credential",
            ProviderError::Timeout => "timeout",
            ProviderError::Unreachable(_) => "unreachable",
            ProviderError::Http { .. } => "http",
        }
    }
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    /// Sends `prompt` as the user message and returns the first choice's content.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

// Module declarations
pub mod groq;
pub mod mocks;

pub use groq::GroqProvider;
pub use mocks::MockProvider;
