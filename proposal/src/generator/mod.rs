//! Text generation: the [`ProposalGenerator`] trait, its configuration, and the OpenAI and
//! mock implementations.
//!
//! The pipeline only sees `Arc<dyn ProposalGenerator>`, so tests and offline demos swap in
//! [`MockGenerator`] while production uses [`OpenAiGenerator`] built from a
//! [`GeneratorConfig`] that was read once at startup.

mod mock;
mod openai;

pub use mock::MockGenerator;
pub use openai::OpenAiGenerator;

use std::fmt;

use async_trait::async_trait;

use crate::error::GenerationError;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Generated proposal body. Plain text, already trimmed by the generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposalText(String);

impl ProposalText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProposalText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProposalText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Produces proposal text from a user prompt. One call per submission, no retries.
#[async_trait]
pub trait ProposalGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<ProposalText, GenerationError>;
}

/// Settings for [`OpenAiGenerator`]. Built once at process start and passed in explicitly.
#[derive(Clone, PartialEq)]
pub struct GeneratorConfig {
    /// `None` makes every call fail with [`GenerationError::MissingApiKey`].
    pub api_key: Option<String>,
    /// Base URL including `/v1`; `None` uses the client default (api.openai.com).
    pub api_base: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

// The key never goes to logs.
impl fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl GeneratorConfig {
    /// Reads `OPENAI_API_KEY`, `OPENAI_BASE_URL` (or `OPENAI_API_BASE`) and
    /// `PROPOSAL_MODEL` from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injected lookup. Empty values count as unset.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());
        let default = Self::default();
        Self {
            api_key: non_empty("OPENAI_API_KEY"),
            api_base: non_empty("OPENAI_BASE_URL").or_else(|| non_empty("OPENAI_API_BASE")),
            model: non_empty("PROPOSAL_MODEL").unwrap_or(default.model),
            ..default
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
