//! Process-wide event logger.
//!
//! Every error surfaced along a request path is recorded here with its call
//! site, the OS user, the request id and the full message. Entries always go
//! to the terminal drain; an optional [`LogSink`] also persists them. A sink
//! failure is reported on stderr and never stops the process.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use once_cell::sync::OnceCell;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};
use slog::{o, Drain, Logger};
use slog_async::Async;
use slog_term::{FullFormat, TermDecorator};
use std::fmt::Display;
use std::sync::Arc;

use crate::entities::log_entry;

static EVENT_LOGGER: OnceCell<EventLogger> = OnceCell::new();

/// Source location of a recorded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
}

/// One event log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub logged_at: String,
    pub os_user: String,
    pub request_id: Option<String>,
    pub file: String,
    pub line: u32,
    pub function: String,
    pub message: String,
}

impl LogEntry {
    pub fn capture(site: CallSite, message: impl Display) -> Self {
        Self {
            logged_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            os_user: os_user(),
            request_id: crate::tracing::current_request_id().map(|id| id.0),
            file: site.file.to_string(),
            line: site.line,
            function: site.function.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("event log storage failed: {0}")]
    Storage(#[from] DbErr),
    #[error("event log sink unavailable: {0}")]
    Unavailable(String),
}

/// Destination that persists event log entries.
#[async_trait]
pub trait LogSink: Send + Sync {
    async fn append(&self, entry: &LogEntry) -> Result<(), SinkError>;
}

/// Appends entries to the `logs` table.
pub struct DbLogSink {
    db: DatabaseConnection,
}

impl DbLogSink {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LogSink for DbLogSink {
    async fn append(&self, entry: &LogEntry) -> Result<(), SinkError> {
        let row = log_entry::ActiveModel {
            logged_at: Set(entry.logged_at.clone()),
            os_user: Set(entry.os_user.clone()),
            request_id: Set(entry.request_id.clone()),
            file: Set(entry.file.clone()),
            line: Set(i32::try_from(entry.line).unwrap_or(i32::MAX)),
            function: Set(entry.function.clone()),
            message: Set(entry.message.clone()),
            ..Default::default()
        };
        row.insert(&self.db).await?;
        Ok(())
    }
}

pub struct EventLogger {
    terminal: Logger,
    fallback: Logger,
    sink: Option<Arc<dyn LogSink>>,
}

impl EventLogger {
    /// Terminal output on stdout, stderr fallback for sink failures.
    pub fn new(sink: Option<Arc<dyn LogSink>>) -> Self {
        Self::with_drains(
            term_logger(TermDecorator::new().stdout().build()),
            term_logger(TermDecorator::new().stderr().build()),
            sink,
        )
    }

    pub fn with_drains(terminal: Logger, fallback: Logger, sink: Option<Arc<dyn LogSink>>) -> Self {
        Self {
            terminal,
            fallback,
            sink,
        }
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Records `message` against `site` and returns the entry that was written.
    pub async fn record(&self, site: CallSite, message: impl Display) -> LogEntry {
        let entry = LogEntry::capture(site, message);

        slog::error!(
            self.terminal,
            "{}", entry.message;
            "function" => &entry.function,
            "line" => entry.line,
            "file" => &entry.file,
            "request_id" => entry.request_id.as_deref().unwrap_or("-"),
            "user" => &entry.os_user,
            "time" => &entry.logged_at,
        );

        if let Some(sink) = &self.sink {
            if let Err(err) = sink.append(&entry).await {
                slog::crit!(
                    self.fallback,
                    "event log sink failed";
                    "error" => %err,
                    "message" => &entry.message,
                    "function" => &entry.function,
                    "request_id" => entry.request_id.as_deref().unwrap_or("-"),
                );
            }
        }

        entry
    }
}

fn term_logger(decorator: TermDecorator) -> Logger {
    let drain = FullFormat::new(decorator).build().fuse();
    let drain = Async::new(drain).chan_size(1024).build().fuse();
    Logger::root(drain, o!("component" => "event_log"))
}

/// Installs the process-wide logger. Returns `false` if one was already installed.
pub fn init_event_logger(sink: Option<Arc<dyn LogSink>>) -> bool {
    EVENT_LOGGER.set(EventLogger::new(sink)).is_ok()
}

/// The process-wide logger; a terminal-only logger when none was installed.
pub fn event_logger() -> &'static EventLogger {
    EVENT_LOGGER.get_or_init(|| EventLogger::new(None))
}

fn os_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|user| !user.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

#[doc(hidden)]
pub fn trim_function_name(name: &'static str) -> &'static str {
    let mut name = name.strip_suffix("::__f").unwrap_or(name);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}

/// Path of the enclosing function.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::logging::trim_function_name(type_name_of(__f))
    }};
}

#[macro_export]
macro_rules! call_site {
    () => {
        $crate::logging::CallSite {
            file: file!(),
            line: line!(),
            function: $crate::function_name!(),
        }
    };
}

/// Records the error of a `Result` with the caller's location and hands the
/// `Result` back unchanged. Must be used inside an async context.
#[macro_export]
macro_rules! record_err {
    ($result:expr) => {{
        let result = $result;
        if let Err(ref err) = result {
            $crate::logging::event_logger()
                .record($crate::call_site!(), err)
                .await;
        }
        result
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemorySink {
        entries: Mutex<Vec<LogEntry>>,
    }

    #[async_trait]
    impl LogSink for MemorySink {
        async fn append(&self, entry: &LogEntry) -> Result<(), SinkError> {
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }
    }

    struct BrokenSink;

    #[async_trait]
    impl LogSink for BrokenSink {
        async fn append(&self, _entry: &LogEntry) -> Result<(), SinkError> {
            Err(SinkError::Unavailable("disk full".into()))
        }
    }

    fn quiet(sink: Option<Arc<dyn LogSink>>) -> EventLogger {
        let discard = || Logger::root(slog::Discard, o!());
        EventLogger::with_drains(discard(), discard(), sink)
    }

    #[tokio::test]
    async fn entries_reach_the_sink_with_call_site() {
        let sink = Arc::new(MemorySink::default());
        let logger = quiet(Some(sink.clone()));

        let site = crate::call_site!();
        logger.record(site, "buyer not found").await;

        let entries = sink.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "buyer not found");
        assert_eq!(entries[0].line, site.line);
        assert!(entries[0].file.ends_with("mod.rs"));
        assert!(entries[0]
            .function
            .ends_with("entries_reach_the_sink_with_call_site"));
        assert!(chrono::DateTime::parse_from_rfc3339(&entries[0].logged_at).is_ok());
    }

    #[tokio::test]
    async fn request_id_is_captured_when_scoped() {
        let sink = Arc::new(MemorySink::default());
        let logger = quiet(Some(sink.clone()));

        crate::tracing::scope_request_id(crate::tracing::RequestId::new("req-7"), async {
            logger.record(crate::call_site!(), "boom").await;
        })
        .await;

        let entries = sink.entries.lock().unwrap();
        assert_eq!(entries[0].request_id.as_deref(), Some("req-7"));
    }

    #[tokio::test]
    async fn sink_failure_is_not_fatal() {
        let logger = quiet(Some(Arc::new(BrokenSink)));
        let entry = logger.record(crate::call_site!(), "still recorded").await;
        assert_eq!(entry.message, "still recorded");
    }

    #[test]
    fn closure_suffixes_are_trimmed() {
        assert_eq!(
            trim_function_name("freshstock_api::handlers::buyers::create::{{closure}}::__f"),
            "freshstock_api::handlers::buyers::create"
        );
        assert_eq!(trim_function_name("a::b"), "a::b");
    }

    #[tokio::test]
    async fn record_err_passes_the_result_through() {
        let ok: Result<i32, String> = crate::record_err!(Ok::<i32, String>(3));
        assert_eq!(ok, Ok(3));

        let err: Result<i32, String> = crate::record_err!(Err::<i32, String>("nope".into()));
        assert_eq!(err, Err("nope".to_string()));
    }
}
