//! End-to-end tests: spawn the server on a random port with a mock generator and drive it
//! over HTTP. Run with `cargo test -p serve --test e2e -- --nocapture` to see responses.

mod common;

mod api;
mod form_page;
mod health;
mod pdf_download;
mod submit_page;
