//! One submission, start to finish: validate → build prompt → generate → render.
//!
//! Each step only runs when the previous one succeeded, so a [`ProposalDocument`] exists
//! exactly when generation produced text for a valid lead. Nothing is kept between runs.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::SubmissionError;
use crate::generator::{ProposalGenerator, ProposalText};
use crate::lead::{LeadForm, LeadRequest};
use crate::prompt::build_prompt;
use crate::render::{render, ProposalDocument};

/// Result of a successful submission.
#[derive(Clone, Debug)]
pub struct Proposal {
    pub request: LeadRequest,
    pub text: ProposalText,
    pub document: ProposalDocument,
}

/// Runs submissions against a shared generator. Clone freely; state is read-only.
#[derive(Clone)]
pub struct Pipeline {
    generator: Arc<dyn ProposalGenerator>,
    output_dir: Option<PathBuf>,
}

impl Pipeline {
    pub fn new(generator: Arc<dyn ProposalGenerator>) -> Self {
        Self {
            generator,
            output_dir: None,
        }
    }

    /// Also save each rendered PDF under `dir` (created on demand).
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn output_dir(&self) -> Option<&std::path::Path> {
        self.output_dir.as_deref()
    }

    /// Runs one submission. Validation errors return before the generator is called;
    /// generation errors return before anything is rendered.
    pub async fn submit(&self, form: LeadForm) -> Result<Proposal, SubmissionError> {
        let submission_id = Uuid::new_v4();
        let span = info_span!("submission", %submission_id);
        self.run(form).instrument(span).await
    }

    async fn run(&self, form: LeadForm) -> Result<Proposal, SubmissionError> {
        let request = form.validate().map_err(|e| {
            warn!(error = %e, "lead rejected");
            e
        })?;
        info!(
            company = %request.company(),
            industry = %request.industry(),
            use_cases = request.use_cases().len(),
            currencies = request.currencies().len(),
            "generating proposal"
        );

        let prompt = build_prompt(&request);
        let text = self.generator.generate(&prompt).await.map_err(|e| {
            warn!(error = %e, "generation failed");
            e
        })?;

        let document = render(&text, request.name()).map_err(|e| {
            error!(error = %e, "render failed");
            e
        })?;

        if let Some(ref dir) = self.output_dir {
            let path = document.write_to(dir).await.map_err(|e| {
                error!(error = %e, dir = %dir.display(), "saving pdf failed");
                crate::error::RenderError::from(e)
            })?;
            info!(path = %path.display(), "proposal saved");
        }

        info!(
            filename = %document.filename,
            bytes = document.bytes.len(),
            "proposal ready"
        );
        Ok(Proposal {
            request,
            text,
            document,
        })
    }
}
