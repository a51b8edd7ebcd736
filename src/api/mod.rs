// src/api/mod.rs

pub mod types;
pub mod analyze;

pub use types::AnalyzeRequest;
pub use analyze::{analyze_contract, analyze_text, EMPTY_INPUT_ERROR};
