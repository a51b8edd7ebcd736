use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{CompletionProvider, ProviderError};

/// In-process provider returning a canned completion or error.
pub struct MockProvider {
    pub name: String,
    response: Result<String, ProviderError>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            response: Err(ProviderError::Http {
                status: None,
                detail: "no canned response".to_string(),
            }),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn with_completion(mut self, content: &str) -> Self {
        self.response = Ok(content.to_string());
        self
    }

    pub fn with_error(mut self, error: ProviderError) -> Self {
        self.response = Err(error);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|prompt| prompt.clone())
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn provider_name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }
        self.response.clone()
    }
}
