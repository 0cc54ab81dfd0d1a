//! Plain-text event format that tags each line with the fields of its root span.
//!
//! Every submission runs inside a `submission` span carrying `submission_id`, so file logs
//! can be grepped per submission.

use std::fmt;

use tracing_core::{Event, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::{FmtContext, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

/// `TIMESTAMP LEVEL [root_span{fields}] target: message fields`
#[derive(Default)]
pub struct RootSpanFormat {
    timer: SystemTime,
}

impl RootSpanFormat {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S, N> FormatEvent<S, N> for RootSpanFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        self.timer.format_time(&mut writer)?;
        write!(writer, " {:>5}", event.metadata().level())?;

        if let Some(root) = ctx.event_scope().and_then(|scope| scope.from_root().next()) {
            write!(writer, " [{}", root.name())?;
            let extensions = root.extensions();
            if let Some(fields) = extensions.get::<FormattedFields<N>>() {
                if !fields.is_empty() {
                    write!(writer, "{{{}}}", fields)?;
                }
            }
            write!(writer, "]")?;
        }

        write!(writer, " {}: ", event.metadata().target())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::SubscriberExt;

    #[derive(Clone)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let writer = {
            let buf = Arc::clone(&buf);
            move || Buffer(Arc::clone(&buf))
        };
        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .event_format(RootSpanFormat::new())
                .with_writer(writer)
                .with_ansi(false),
        );
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buf.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn lines_inside_submission_carry_root_fields() {
        let out = capture(|| {
            let root = tracing::info_span!("submission", submission_id = 42);
            let _root = root.enter();
            let child = tracing::info_span!("openai");
            let _child = child.enter();
            tracing::info!(model = "gpt-3.5-turbo", "request sent");
        });
        assert!(out.contains("[submission{submission_id=42}]"), "{out}");
        assert!(out.contains("INFO"));
        assert!(out.contains("request sent"));
        assert!(out.contains("model=\"gpt-3.5-turbo\""));
    }

    #[test]
    fn lines_outside_spans_have_no_tag() {
        let out = capture(|| tracing::warn!("listening"));
        assert!(!out.contains('['), "{out}");
        assert!(out.contains("WARN"));
        assert!(out.contains("listening"));
    }
}
