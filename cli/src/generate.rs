//! `proposal generate`: one submission, PDF written to `out_dir`.

use std::path::PathBuf;
use std::sync::Arc;

use proposal::{LeadForm, Pipeline, ProposalGenerator, ProposalText};
use tracing::info;

use crate::CliError;

#[derive(Clone, Debug)]
pub struct GenerateOptions {
    pub form: LeadForm,
    /// Created if missing.
    pub out_dir: PathBuf,
}

#[derive(Clone, Debug)]
pub struct GenerateOutput {
    pub text: ProposalText,
    /// Where the PDF was written.
    pub path: PathBuf,
}

/// Validates the lead, generates the proposal and writes `<name>_proposal.pdf` under
/// `opts.out_dir`. Nothing is written when validation or generation fails.
pub async fn run_generate(
    generator: Arc<dyn ProposalGenerator>,
    opts: GenerateOptions,
) -> Result<GenerateOutput, CliError> {
    let pipeline = Pipeline::new(generator).with_output_dir(opts.out_dir.clone());
    let proposal = pipeline.submit(opts.form).await?;
    let path = opts.out_dir.join(&proposal.document.filename);
    info!(path = %path.display(), "proposal saved");
    Ok(GenerateOutput {
        text: proposal.text,
        path,
    })
}
