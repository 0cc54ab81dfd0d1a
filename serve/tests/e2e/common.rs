//! Shared helpers for e2e tests.

use std::sync::Arc;

use proposal::{MockGenerator, Pipeline};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A running server; dropping `shutdown` (or sending on it) stops it.
pub struct TestServer {
    pub base_url: String,
    pub generator: Arc<MockGenerator>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<Result<(), Box<dyn std::error::Error + Send + Sync>>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = tokio::time::timeout(std::time::Duration::from_secs(5), self.handle).await;
    }
}

/// Binds 127.0.0.1:0 and serves a pipeline backed by `generator`.
pub async fn spawn_server(generator: MockGenerator) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let generator = Arc::new(generator);
    let pipeline = Pipeline::new(generator.clone());
    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(serve::run_serve_on_listener(listener, pipeline, async move {
        let _ = rx.await;
    }));
    TestServer {
        base_url: format!("http://{}", addr),
        generator,
        shutdown: Some(tx),
        handle,
    }
}

/// Form body for the Jane / Acme scenario.
pub fn jane_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Jane"),
        ("company", "Acme"),
        ("industry", "Travel"),
        ("use_cases", "Pay Out"),
        ("currencies", "USD"),
        ("notes", ""),
    ]
}

/// Encodes pairs as `application/x-www-form-urlencoded`, repeating keys as browsers do.
pub fn urlencode(pairs: &[(&str, &str)]) -> String {
    reqwest::Url::parse_with_params("http://x/", pairs)
        .unwrap()
        .query()
        .unwrap_or_default()
        .to_string()
}

pub async fn post_form(url: &str, pairs: &[(&str, &str)]) -> reqwest::Response {
    reqwest::Client::new()
        .post(url)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(urlencode(pairs))
        .send()
        .await
        .unwrap()
}

pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
