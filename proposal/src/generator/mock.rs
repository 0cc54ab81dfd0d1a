//! Mock generator for tests and offline demos.
//!
//! Returns a fixed text (or a fixed failure) and records how often it was called and with
//! which prompt, so tests can assert that validation errors never reach the generator.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ProposalGenerator, ProposalText};
use crate::error::GenerationError;

/// Fixed-response [`ProposalGenerator`].
pub struct MockGenerator {
    outcome: Result<String, GenerationError>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockGenerator {
    /// Always returns `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::with_outcome(Ok(text.into()))
    }

    /// Always fails with `GenerationError::Api(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_outcome(Err(GenerationError::Api(message.into())))
    }

    pub fn with_outcome(outcome: Result<String, GenerationError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Number of `generate` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|g| g.clone())
    }
}

#[async_trait]
impl ProposalGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<ProposalText, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }
        self.outcome.clone().map(ProposalText::new)
    }
}
