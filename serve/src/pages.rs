//! HTML rendering with minijinja. One template, `page.html`, shows the sidebar form and the
//! results area for every state: idle, error banner, or success with download link.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use minijinja::{context, Environment, Value};
use proposal::{Currency, Industry, LeadForm, Proposal, UseCase};
use serde::Serialize;

const PAGE_TEMPLATE: &str = "page.html";

pub(crate) const SUCCESS_MESSAGE: &str = "Proposal Generated Successfully!";
pub(crate) const NOTES_PLACEHOLDER: &str =
    "e.g., custom APIs, multi-language support, detailed reporting";
pub(crate) const FOOTER: &str = "AI-powered proposal generation. Please review and refine the \
     content before sharing with the lead to ensure accuracy and alignment with business objectives.";

/// Template environment with autoescaping on (`.html` name).
pub(crate) fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(PAGE_TEMPLATE, include_str!("../templates/page.html"))?;
    Ok(env)
}

#[derive(Serialize)]
struct Banner {
    kind: &'static str,
    message: String,
}

#[derive(Serialize)]
struct Download {
    filename: String,
    href: Value,
}

/// What the results area shows.
pub(crate) enum Outcome<'a> {
    Idle,
    Error(String),
    Success(&'a Proposal),
}

/// `data:` URI carrying the PDF, so nothing is kept on the server after the response.
pub(crate) fn pdf_data_uri(bytes: &[u8]) -> String {
    format!("data:application/pdf;base64,{}", STANDARD.encode(bytes))
}

pub(crate) fn render_page(
    env: &Environment<'static>,
    form: &LeadForm,
    outcome: Outcome<'_>,
) -> Result<String, minijinja::Error> {
    let (banner, proposal, download) = match outcome {
        Outcome::Idle => (None, None, None),
        Outcome::Error(message) => (
            Some(Banner {
                kind: "error",
                message,
            }),
            None,
            None,
        ),
        Outcome::Success(p) => (
            Some(Banner {
                kind: "success",
                message: SUCCESS_MESSAGE.to_string(),
            }),
            Some(p.text.as_str()),
            Some(Download {
                filename: p.document.filename.clone(),
                // base64 alphabet only; safe to emit unescaped.
                href: Value::from_safe_string(pdf_data_uri(&p.document.bytes)),
            }),
        ),
    };

    let selected_industry = form
        .industry
        .as_deref()
        .and_then(|s| s.parse::<Industry>().ok())
        .unwrap_or_default();

    env.get_template(PAGE_TEMPLATE)?.render(context! {
        industries => Industry::ALL.iter().map(|i| i.label()).collect::<Vec<_>>(),
        use_case_options => UseCase::ALL.iter().map(|u| u.label()).collect::<Vec<_>>(),
        currency_options => Currency::ALL.iter().map(|c| c.label()).collect::<Vec<_>>(),
        selected_industry => selected_industry.label(),
        form => form,
        notes_placeholder => NOTES_PLACEHOLDER,
        banner => banner,
        proposal => proposal,
        download => download,
        footer => FOOTER,
    })
}
