//! HTTP front end for Proposal Studio (axum).
//!
//! Serves the lead form on `http://127.0.0.1:8501` by default, runs one pipeline per
//! submission and answers with the result page, the PDF, or JSON.
//!
//! **Public API**: [`run_serve`], [`run_serve_on_listener`], [`ServeConfig`].

mod app;
mod handlers;
mod pages;

use std::future::Future;
use std::sync::Arc;

use proposal::Pipeline;
use tokio::net::TcpListener;
use tracing::info;

use app::{router, AppState};

pub use app::{ServeConfig, DEFAULT_ADDR};

/// Serves on an existing listener until `shutdown` resolves. Tests bind `127.0.0.1:0` and
/// pass the listener in.
pub async fn run_serve_on_listener<F>(
    listener: TcpListener,
    pipeline: Pipeline,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("proposal server listening on http://{}", addr);
    if let Some(dir) = pipeline.output_dir() {
        info!(dir = %dir.display(), "rendered proposals will be saved");
    }

    let state = Arc::new(AppState::new(pipeline)?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("proposal server stopped");
    Ok(())
}

/// Binds `config.addr` and serves until Ctrl-C.
pub async fn run_serve(
    config: &ServeConfig,
    pipeline: Pipeline,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let pipeline = match config.output_dir {
        Some(ref dir) => pipeline.with_output_dir(dir),
        None => pipeline,
    };
    let listener = TcpListener::bind(&config.addr).await?;
    run_serve_on_listener(listener, pipeline, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}
