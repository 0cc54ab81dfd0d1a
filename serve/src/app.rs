//! Axum app: settings, shared state and router.
//!
//! Routes:
//! - `GET /` form page
//! - `POST /proposal` form submission, answered with the result page
//! - `POST /proposal.pdf` form submission, answered with the PDF itself
//! - `POST /api/proposals` JSON submission
//! - `GET /health`

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use minijinja::Environment;
use proposal::Pipeline;

use super::handlers::{health, index, submit_api, submit_page, submit_pdf};
use super::pages;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8501";

/// Server settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServeConfig {
    /// Listen address.
    pub addr: String,
    /// When set, every rendered PDF is also saved here.
    pub output_dir: Option<PathBuf>,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            output_dir: None,
        }
    }
}

impl ServeConfig {
    /// Builds settings from `PROPOSAL_ADDR` and `PROPOSAL_OUTPUT_DIR`, falling back to
    /// [`Default`] for unset or empty values.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            addr: std::env::var("PROPOSAL_ADDR")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(default.addr),
            output_dir: std::env::var_os("PROPOSAL_OUTPUT_DIR")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        }
    }
}

/// Shared, read-only state handed to every handler.
pub(crate) struct AppState {
    pub(crate) pipeline: Pipeline,
    pub(crate) templates: Environment<'static>,
}

impl AppState {
    pub(crate) fn new(pipeline: Pipeline) -> Result<Self, minijinja::Error> {
        Ok(Self {
            pipeline,
            templates: pages::environment()?,
        })
    }
}

pub(crate) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/proposal", post(submit_page))
        .route("/proposal.pdf", post(submit_pdf))
        .route("/api/proposals", post(submit_api))
        .route("/health", get(health))
        .with_state(state)
}
