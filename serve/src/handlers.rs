//! Request handlers. Each submission runs the pipeline once and maps the typed outcome to
//! a page, a PDF attachment or a JSON body.

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use proposal::{LeadForm, SubmissionError};
use serde_json::json;
use tracing::error;

use super::app::AppState;
use super::pages::{render_page, Outcome};

type FormPairs = Vec<(String, String)>;

/// Status for a failed submission: bad input, upstream failure, or our own fault.
pub(crate) fn status_for(err: &SubmissionError) -> StatusCode {
    match err {
        SubmissionError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionError::Generation(_) => StatusCode::BAD_GATEWAY,
        SubmissionError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Banner text for a failed submission. Render failures do not leak details.
fn banner_message(err: &SubmissionError) -> String {
    match err {
        SubmissionError::Render(_) => {
            "An internal error occurred while rendering the proposal.".to_string()
        }
        other => other.to_string(),
    }
}

/// ASCII-only `Content-Disposition` so the header is always valid.
pub(crate) fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '_' })
        .collect();
    format!("attachment; filename=\"{}\"", ascii)
}

fn page(state: &AppState, status: StatusCode, form: &LeadForm, outcome: Outcome<'_>) -> Response {
    match render_page(&state.templates, form, outcome) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!(error = %e, "template render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
        }
    }
}

pub(crate) async fn index(State(state): State<Arc<AppState>>) -> Response {
    page(&state, StatusCode::OK, &LeadForm::default(), Outcome::Idle)
}

pub(crate) async fn health() -> &'static str {
    "ok"
}

pub(crate) async fn submit_page(
    State(state): State<Arc<AppState>>,
    Form(pairs): Form<FormPairs>,
) -> Response {
    let form = LeadForm::from_pairs(pairs);
    match state.pipeline.submit(form.clone()).await {
        Ok(proposal) => page(&state, StatusCode::OK, &form, Outcome::Success(&proposal)),
        Err(e) => page(&state, status_for(&e), &form, Outcome::Error(banner_message(&e))),
    }
}

pub(crate) async fn submit_pdf(
    State(state): State<Arc<AppState>>,
    Form(pairs): Form<FormPairs>,
) -> Response {
    let form = LeadForm::from_pairs(pairs);
    match state.pipeline.submit(form.clone()).await {
        Ok(proposal) => {
            let disposition = content_disposition(&proposal.document.filename);
            (
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                proposal.document.bytes,
            )
                .into_response()
        }
        Err(e) => page(&state, status_for(&e), &form, Outcome::Error(banner_message(&e))),
    }
}

pub(crate) async fn submit_api(
    State(state): State<Arc<AppState>>,
    Json(form): Json<LeadForm>,
) -> Response {
    match state.pipeline.submit(form).await {
        Ok(proposal) => Json(json!({
            "proposal": proposal.text.as_str(),
            "filename": proposal.document.filename,
            "pdf_base64": STANDARD.encode(&proposal.document.bytes),
        }))
        .into_response(),
        Err(e) => (
            status_for(&e),
            Json(json!({ "kind": e.kind(), "error": banner_message(&e) })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proposal::{GenerationError, RenderError, ValidationError};

    #[test]
    fn statuses_follow_error_kind() {
        let validation = SubmissionError::Validation(ValidationError::InvalidChoice {
            field: proposal::Field::Industry,
            value: "Space".into(),
        });
        assert_eq!(status_for(&validation), StatusCode::UNPROCESSABLE_ENTITY);
        let generation = SubmissionError::Generation(GenerationError::EmptyResponse);
        assert_eq!(status_for(&generation), StatusCode::BAD_GATEWAY);
        let render = SubmissionError::Render(RenderError::Io(std::io::Error::other("disk")));
        assert_eq!(status_for(&render), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!banner_message(&render).contains("disk"));
    }

    #[test]
    fn content_disposition_is_ascii() {
        assert_eq!(
            content_disposition("Jane_proposal.pdf"),
            "attachment; filename=\"Jane_proposal.pdf\""
        );
        assert_eq!(
            content_disposition("José_proposal.pdf"),
            "attachment; filename=\"Jos__proposal.pdf\""
        );
    }
}
