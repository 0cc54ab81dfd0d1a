//! Command-line front end for Proposal Studio.
//!
//! `proposal serve` starts the web form; `proposal generate` runs one submission without a
//! browser and writes the PDF to disk. Both share [`make_generator`], which picks OpenAI or
//! a canned mock (`--mock TEXT`) for offline runs.

mod generate;

pub use generate::{run_generate, GenerateOptions, GenerateOutput};

use std::sync::Arc;

use proposal::{
    GeneratorConfig, MockGenerator, OpenAiGenerator, Pipeline, ProposalGenerator, SubmissionError,
};
use serve::ServeConfig;
use tracing::{debug, info, warn};

/// Errors surfaced by CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error("serve error: {0}")]
    Serve(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Reports the outcome of `config::load_and_apply`. A broken `.env` or `config.toml` does
/// not stop startup, but it is logged and printed so a missing `OPENAI_API_KEY` can be
/// traced back to the file. Returns whether the config was applied.
pub fn report_config_load(result: &Result<usize, config::LoadError>) -> bool {
    match result {
        Ok(applied) => {
            debug!(applied, "config loaded");
            true
        }
        Err(e) => {
            warn!(error = %e, "config load failed; .env and config.toml values were not applied");
            eprintln!("proposal: config not loaded: {}", e);
            false
        }
    }
}

/// Returns a mock generator answering `mock_text` when set, otherwise an OpenAI generator
/// configured from the environment with an optional model override.
pub fn make_generator(
    mock_text: Option<String>,
    model: Option<String>,
) -> Arc<dyn ProposalGenerator> {
    if let Some(text) = mock_text {
        info!("using mock generator");
        return Arc::new(MockGenerator::with_text(text));
    }
    let mut config = GeneratorConfig::from_env();
    if let Some(model) = model {
        config = config.with_model(model);
    }
    if config.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; every generation will fail");
    }
    info!(model = %config.model, "using OpenAI generator");
    Arc::new(OpenAiGenerator::new(config))
}

/// Runs the web server until Ctrl-C.
pub async fn run_serve(
    config: ServeConfig,
    generator: Arc<dyn ProposalGenerator>,
) -> Result<(), CliError> {
    serve::run_serve(&config, Pipeline::new(generator))
        .await
        .map_err(CliError::Serve)
}
