//! Error taxonomy for one submission.
//!
//! Validation and generation failures are expected outcomes that the presentation layer
//! turns into banners. Render failures are internal errors.

use std::fmt;

use thiserror::Error;

/// Banner text shown for any missing required field.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields in the sidebar.";

/// Form fields that validation can complain about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    LeadName,
    CompanyName,
    Industry,
    UseCases,
    Currencies,
}

impl Field {
    /// Label as printed next to the form control.
    pub fn label(self) -> &'static str {
        match self {
            Field::LeadName => "Lead Name",
            Field::CompanyName => "Company Name",
            Field::Industry => "Industry",
            Field::UseCases => "Use Cases",
            Field::Currencies => "Required Currencies",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One or more required fields were empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingFieldError {
    fields: Vec<Field>,
}

impl MissingFieldError {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

impl fmt::Display for MissingFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MISSING_FIELDS_MESSAGE)?;
        if !self.fields.is_empty() {
            let labels: Vec<&str> = self.fields.iter().map(|f| f.label()).collect();
            write!(f, " Missing: {}.", labels.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for MissingFieldError {}

/// Why a [`crate::LeadForm`] could not become a [`crate::LeadRequest`].
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    MissingFields(#[from] MissingFieldError),

    /// A submitted label is not one of the fixed choices for `field`.
    #[error("{value:?} is not a valid choice for {field}")]
    InvalidChoice { field: Field, value: String },
}

/// The text-generation call failed. Carries the underlying cause as text; never retried.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum GenerationError {
    /// No API key was configured; reported at call time, never at startup.
    #[error("authentication failed: OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("OpenAI request build failed: {0}")]
    Request(String),

    /// Transport, authentication or decoding failure reported by the client.
    #[error("OpenAI API error: {0}")]
    Api(String),

    /// The response had no choices, or the first choice had no text.
    #[error("OpenAI returned no proposal text")]
    EmptyResponse,
}

/// Writing the PDF failed.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("pdf: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a failed submission, branched on by the presentation layer.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("An error occurred while generating the proposal: {0}")]
    Generation(#[from] GenerationError),

    #[error("rendering the proposal failed: {0}")]
    Render(#[from] RenderError),
}

impl SubmissionError {
    /// Stable machine-readable kind, used by the JSON API.
    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionError::Validation(ValidationError::MissingFields(_)) => "missing_field",
            SubmissionError::Validation(ValidationError::InvalidChoice { .. }) => "invalid_choice",
            SubmissionError::Generation(_) => "generation",
            SubmissionError::Render(_) => "render",
        }
    }
}
