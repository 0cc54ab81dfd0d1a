//! # Proposal
//!
//! Core of Proposal Studio: turn a sales lead into a drafted business proposal and a PDF.
//!
//! The flow for one submission is strictly sequential:
//!
//! 1. [`LeadForm::validate`] checks required fields and resolves the fixed choice lists
//!    into a [`LeadRequest`].
//! 2. [`build_prompt`] interpolates the lead into a fixed instruction template.
//! 3. A [`ProposalGenerator`] ([`OpenAiGenerator`] in production, [`MockGenerator`] in
//!    tests) turns the prompt into [`ProposalText`].
//! 4. [`render`] lays the text out as a paginated PDF ([`ProposalDocument`]).
//!
//! [`Pipeline`] wires the steps together and returns a typed [`SubmissionError`] so the
//! presentation layer can branch on missing fields vs. generation failures.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use proposal::{GeneratorConfig, LeadForm, OpenAiGenerator, Pipeline};
//!
//! # async fn demo() -> Result<(), proposal::SubmissionError> {
//! let generator = OpenAiGenerator::new(GeneratorConfig::from_env());
//! let pipeline = Pipeline::new(Arc::new(generator));
//! let form = LeadForm {
//!     name: "Jane".into(),
//!     company: "Acme".into(),
//!     use_cases: vec!["Pay Out".into()],
//!     currencies: vec!["USD".into()],
//!     ..LeadForm::default()
//! };
//! let proposal = pipeline.submit(form).await?;
//! println!("{}", proposal.text);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod lead;
pub mod pipeline;
pub mod prompt;
pub mod render;

pub use error::{
    Field, GenerationError, MissingFieldError, RenderError, SubmissionError, ValidationError,
    MISSING_FIELDS_MESSAGE,
};
pub use generator::{
    GeneratorConfig, MockGenerator, OpenAiGenerator, ProposalGenerator, ProposalText,
};
pub use lead::{Currency, Industry, LeadForm, LeadRequest, UseCase};
pub use pipeline::{Pipeline, Proposal};
pub use prompt::{build_prompt, SYSTEM_PROMPT};
pub use render::{proposal_filename, render, ProposalDocument};

/// When running `cargo test -p proposal`, initializes tracing from `RUST_LOG` so unit tests
/// can print logs with `--nocapture`.
#[cfg(test)]
mod test_logging {
    use ctor::ctor;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::Layer;

    #[ctor]
    fn init() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_filter(filter),
            )
            .try_init();
    }
}
