// src/lib.rs

pub mod types;
pub mod config;
pub mod prompt;
pub mod providers;
pub mod api;
pub mod logging;
pub mod server;

// Re-export commonly used types
pub use types::AnalysisResult;
pub use config::{AnalyzerConfig, ServerConfig};
pub use providers::{CompletionProvider, ProviderError};
pub use api::{analyze_contract, analyze_text, AnalyzeRequest};
