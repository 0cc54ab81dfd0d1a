//! Logging initialization.
//!
//! - **RUST_LOG**: filter, e.g. `info`, `proposal=debug`. Default: `info,hyper_util=off`.
//! - **LOG_FILE**: when set, logs are appended to that file as plain text. Otherwise they
//!   go to stderr so stdout stays clean for `generate` output.

use std::io::Write;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::log_format::RootSpanFormat;

pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper_util=off"));

    if let Ok(path) = std::env::var("LOG_FILE") {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        let layer = tracing_subscriber::fmt::layer()
            .event_format(RootSpanFormat::new())
            .with_writer(std::sync::Mutex::new(StripAnsiWriter::new(file)))
            .with_ansi(false)
            .with_filter(filter);
        tracing_subscriber::registry().with(layer).try_init()?;
        tracing::info!(path = %path, "logging to file");
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(filter);
        tracing_subscriber::registry().with(layer).try_init()?;
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Escape {
    None,
    /// Saw ESC.
    Start,
    /// Inside `ESC [ ...`, waiting for the final byte.
    Csi,
}

/// Drops ANSI CSI sequences (colors, cursor moves) so log files stay plain text. Lead
/// names and model output are logged verbatim and may carry them.
struct StripAnsiWriter<W> {
    inner: W,
    escape: Escape,
}

impl<W: Write> StripAnsiWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            escape: Escape::None,
        }
    }
}

impl<W: Write> Write for StripAnsiWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut plain = Vec::with_capacity(buf.len());
        for &b in buf {
            self.escape = match (self.escape, b) {
                (Escape::None, 0x1b) => Escape::Start,
                (Escape::None, _) => {
                    plain.push(b);
                    Escape::None
                }
                (Escape::Start, b'[') => Escape::Csi,
                // Not a CSI: keep the byte, drop the lone ESC.
                (Escape::Start, _) => {
                    plain.push(b);
                    Escape::None
                }
                (Escape::Csi, 0x40..=0x7e) => Escape::None,
                (Escape::Csi, _) => Escape::Csi,
            };
        }
        self.inner.write_all(&plain)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
