//! OpenAI Chat Completions client implementing [`ProposalGenerator`].
//!
//! One non-streaming `chat/completions` call per proposal: a fixed system message plus
//! the built prompt, `max_completion_tokens` and `temperature` from [`GeneratorConfig`].
//! The trimmed content of the first choice becomes the [`ProposalText`]. Rate-limit and
//! server errors are returned on the first response; the client never retries.
//!
//! Request and response bodies are logged at `trace` with a per-call `trace_id`; run with
//! `RUST_LOG=proposal=trace` to see them.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use std::time::Duration;
use tracing::{debug, trace};
use uuid::Uuid;

use super::{GeneratorConfig, ProposalGenerator, ProposalText};
use crate::error::GenerationError;
use crate::prompt::SYSTEM_PROMPT;

/// Chat Completions generator. Cheap to share behind an `Arc`.
pub struct OpenAiGenerator {
    client: Client<OpenAIConfig>,
    config: GeneratorConfig,
}

impl OpenAiGenerator {
    /// Builds the client from explicit settings; nothing is read from the environment here.
    pub fn new(config: GeneratorConfig) -> Self {
        let mut openai = OpenAIConfig::new().with_api_key(config.api_key.clone().unwrap_or_default());
        if let Some(ref base) = config.api_base {
            openai = openai.with_api_base(base.trim_end_matches('/'));
        }
        // Zero elapsed-time budget: the first 429/5xx is final.
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        Self {
            client: Client::with_config(openai).with_backoff(no_retry),
            config,
        }
    }

    /// URL used for logging only.
    fn chat_completions_url(&self) -> String {
        let base = self
            .config
            .api_base
            .as_deref()
            .unwrap_or("https://api.openai.com/v1")
            .trim_end_matches('/');
        format!("{}/chat/completions", base)
    }

    fn messages(prompt: &str) -> Vec<ChatCompletionRequestMessage> {
        vec![
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage::from(
                SYSTEM_PROMPT,
            )),
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage::from(prompt)),
        ]
    }
}

#[async_trait]
impl ProposalGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<ProposalText, GenerationError> {
        if self.config.api_key.is_none() {
            return Err(GenerationError::MissingApiKey);
        }

        let trace_id = Uuid::new_v4().to_string();
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.config.model.clone());
        args.messages(Self::messages(prompt));
        args.max_completion_tokens(self.config.max_tokens);
        args.temperature(self.config.temperature);
        let request = args
            .build()
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let url = self.chat_completions_url();
        debug!(
            trace_id = %trace_id,
            url = %url,
            model = %self.config.model,
            max_tokens = self.config.max_tokens,
            temperature = self.config.temperature,
            prompt_len = prompt.len(),
            "OpenAI chat create"
        );
        if let Ok(js) = serde_json::to_string_pretty(&request) {
            trace!(trace_id = %trace_id, request = %js, "OpenAI request body");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| GenerationError::Api(e.to_string()))?;

        if let Ok(js) = serde_json::to_string_pretty(&response) {
            trace!(trace_id = %trace_id, response = %js, "OpenAI response body");
        }
        if let Some(ref usage) = response.usage {
            debug!(
                trace_id = %trace_id,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "OpenAI usage"
            );
        }

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GenerationError::EmptyResponse)?;
        let text = content.trim();
        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(ProposalText::new(text))
    }
}
