use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error as _;
use std::io;

use super::{CompletionProvider, ProviderError};
use crate::config::AnalyzerConfig;
use crate::prompt::SYSTEM_PROMPT;

/// OpenAI-compatible chat completion client for the Groq endpoint.
pub struct GroqProvider {
    client: reqwest::Client,
    config: AnalyzerConfig,
}

impl GroqProvider {
    pub fn new(config: AnalyzerConfig) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn io_error_kinds(err: &reqwest::Error) -> Vec<io::ErrorKind> {
    let mut kinds = Vec::new();
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            kinds.push(io_err.kind());
        }
        source = cause.source();
    }
    kinds
}

fn map_transport_error(err: reqwest::Error) -> ProviderError {
    let kinds = io_error_kinds(&err);
    let dropped = kinds.iter().any(|kind| {
        matches!(
            kind,
            io::ErrorKind::ConnectionReset
                | io::ErrorKind::ConnectionAborted
                | io::ErrorKind::BrokenPipe
                | io::ErrorKind::UnexpectedEof
        )
    });

    // Connect timeouts report both flags and count as unreachable.
    if err.is_connect() {
        ProviderError::Unreachable(err.to_string())
    } else if err.is_timeout() || kinds.contains(&io::ErrorKind::TimedOut) {
        ProviderError::Timeout
    } else if dropped || (err.is_request() && err.status().is_none()) {
        // Connection closed or reset before a response arrived.
        ProviderError::Unreachable(err.to_string())
    } else {
        ProviderError::Http {
            status: err.status().map(|s| s.as_u16()),
            detail: err.to_string(),
        }
    }
}

fn is_empty_json(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Prefers the upstream JSON error body, falling back to the HTTP error text
/// when the body is not JSON or is an empty value.
fn error_detail(body: &str, fallback: String) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) if !is_empty_json(&value) => value.to_string(),
        _ => fallback,
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    fn provider_name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential)?;

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let fallback = response
                .error_for_status_ref()
                .err()
                .map(|e| e.to_string())
                .unwrap_or_else(|| format!("HTTP status {}", status));
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => match map_transport_error(e) {
                    err @ (ProviderError::Timeout | ProviderError::Unreachable(_)) => return Err(err),
                    _ => String::new(),
                },
            };
            tracing::warn!(status = status.as_u16(), "Upstream returned an error status");

            return Err(ProviderError::Http {
                status: Some(status.as_u16()),
                detail: error_detail(&body, fallback),
            });
        }

        let text = response.text().await.map_err(map_transport_error)?;

        let envelope: ChatResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::Http {
                status: None,
                detail: format!("invalid completion envelope: {}", e),
            })?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::Http {
                status: None,
                detail: "completion contained no message content".to_string(),
            })?;

        tracing::debug!(content_len = content.len(), "Received completion");

        Ok(content)
    }
}
