// src/types.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body returned for every analysis request.
///
/// Serialized untagged so the wire shape is one of
/// `{"sections": {...}, "raw": "..."}`, `{"raw": "..."}` or `{"error": "..."}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AnalysisResult {
    Failure {
        error: String,
    },
    Success {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sections: Option<Value>,
        raw: String,
    },
}

impl AnalysisResult {
    pub fn failure(message: impl Into<String>) -> Self {
        AnalysisResult::Failure {
            error: message.into(),
        }
    }

    /// Interprets a completion string. Text that is not valid JSON is kept
    /// as `raw` only.
    pub fn from_completion(content: String) -> Self {
        let sections = serde_json::from_str::<Value>(&content).ok();
        AnalysisResult::Success {
            sections,
            raw: content,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, AnalysisResult::Failure { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            AnalysisResult::Failure { error } => Some(error),
            AnalysisResult::Success { .. } => None,
        }
    }

    pub fn sections(&self) -> Option<&Value> {
        match self {
            AnalysisResult::Success { sections, .. } => sections.as_ref(),
            AnalysisResult::Failure { .. } => None,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        match self {
            AnalysisResult::Success { raw, .. } => Some(raw),
            AnalysisResult::Failure { .. } => None,
        }
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisResult::Failure { .. } => "error",
            AnalysisResult::Success { sections: Some(_), .. } => "sections",
            AnalysisResult::Success { sections: None, .. } => "raw",
        }
    }
}
