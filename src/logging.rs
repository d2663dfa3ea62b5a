// src/logging.rs
//! Process-wide logging: one stdout sink, INFO and above, one line per event
//! formatted as `timestamp - target - LEVEL - message`.

use chrono::Local;
use std::fmt;
use std::sync::OnceLock;
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

static LOGGER: OnceLock<LoggerHandle> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    Stdout,
}

/// Describes the logger installed by [`setup_logging`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerHandle {
    pub level: LevelFilter,
    pub sink: LogSink,
    /// False when another global subscriber was already installed
    pub installed: bool,
}

/// Event formatter producing `2024-05-01 12:00:00,123 - target - INFO - message`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
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
        let meta = event.metadata();
        write!(
            writer,
            "{} - {} - {} - ",
            Local::now().format(TIMESTAMP_FORMAT),
            meta.target(),
            meta.level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the process-wide subscriber. Only the first call attaches a sink;
/// later calls return the same handle.
pub fn setup_logging() -> &'static LoggerHandle {
    LOGGER.get_or_init(|| {
        let installed = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(LineFormat)
                    .with_writer(std::io::stdout),
            )
            .with(LevelFilter::INFO)
            .try_init()
            .is_ok();

        LoggerHandle {
            level: LevelFilter::INFO,
            sink: LogSink::Stdout,
            installed,
        }
    })
}

/// In-memory sink for asserting on formatted log output.
#[cfg(test)]
pub(crate) mod capture {
    use super::LineFormat;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::Subscriber;
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    pub(crate) struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    impl Capture {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }

        /// Subscriber writing `LineFormat` lines into this capture.
        pub(crate) fn subscriber(&self) -> impl Subscriber + Send + Sync {
            tracing_subscriber::fmt()
                .event_format(LineFormat)
                .with_writer(self.clone())
                .with_max_level(LevelFilter::INFO)
                .finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::capture::Capture;
    use super::*;
    use regex::Regex;

    #[test]
    fn test_line_format() {
        let capture = Capture::default();

        tracing::subscriber::with_default(capture.subscriber(), || {
            tracing::info!("Starting job description API");
            tracing::debug!("not shown");
            tracing::error!("Security error: {}", "bad input");
        });

        let output = capture.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let info = Regex::new(
            r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2},\d{3} - job_description_api::logging::tests - INFO - Starting job description API$",
        )
        .unwrap();
        assert!(info.is_match(lines[0]), "unexpected line: {}", lines[0]);
        assert!(lines[1].ends_with(" - ERROR - Security error: bad input"));
    }

    #[test]
    fn test_setup_logging_is_idempotent() {
        let first = setup_logging();
        let second = setup_logging();

        assert!(std::ptr::eq(first, second));
        assert_eq!(first.level, LevelFilter::INFO);
        assert_eq!(first.sink, LogSink::Stdout);
    }
}
