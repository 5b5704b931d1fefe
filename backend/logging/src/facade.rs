//! The logging facade.
//!
//! One [`LogFacade`] owns both sinks. Every leveled call builds its own
//! [`LogRecord`], label included, and hands it to the sinks whose threshold
//! it passes. Nothing about a call is stored in shared state, so concurrent
//! callers can never swap each other's labels.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use corrlog_config::{validate, LogConfig};
use corrlog_core::{CorrlogError, LogRecord, Payload, Result, Severity, SeverityCell};
use tracing::{Dispatch, Level};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::label::compose_label;
use crate::sinks::{build_dispatch, CONSOLE_TARGET, FILE_TARGET};
use crate::writer::{ensure_log_dir, open_file_writer};

macro_rules! record_event {
    ($target:expr, $level:expr, $record:ident, $body:ident, $data:ident) => {
        tracing::event!(
            target: $target,
            $level,
            label = %$record.label,
            severity = %$record.severity,
            data = %$data,
            "{}",
            $body
        )
    };
}

/// Emit `$record` under the constant `$target`.
///
/// Callsites need a constant level, hence one arm per tracing level.
macro_rules! emit_record {
    ($target:expr, $record:expr) => {{
        let record: &LogRecord = $record;
        let body = record.body();
        let data = record.data_text();
        match record.severity {
            Severity::Silly => record_event!($target, Level::TRACE, record, body, data),
            Severity::Debug | Severity::Verbose => {
                record_event!($target, Level::DEBUG, record, body, data)
            }
            Severity::Info => record_event!($target, Level::INFO, record, body, data),
            Severity::Warn => record_event!($target, Level::WARN, record, body, data),
            Severity::Error => record_event!($target, Level::ERROR, record, body, data),
        }
    }};
}

#[derive(Debug)]
struct SinkState {
    level: SeverityCell,
    handle_exceptions: bool,
}

impl SinkState {
    fn new(config: &corrlog_config::SinkConfig) -> Self {
        Self {
            level: SeverityCell::new(config.level),
            handle_exceptions: config.handle_exceptions,
        }
    }
}

/// Console plus rotating-file logger with per-call labels.
#[derive(Debug)]
pub struct LogFacade {
    dispatch: Dispatch,
    console: SinkState,
    file: SinkState,
    /// Fallback label for records without a usable source location.
    default_label: RwLock<Option<String>>,
    file_path: Option<PathBuf>,
}

impl LogFacade {
    /// Build the facade with stdout and the dated file under `config.log_dir`.
    ///
    /// Creates the log directory if needed; failure to do so is fatal.
    pub fn new(config: LogConfig) -> Result<Self> {
        check(&config)?;
        ensure_log_dir(&config.log_dir)?;
        let (file_writer, path) = open_file_writer(&config.log_dir, &config.file)?;
        Ok(Self::assemble(
            &config,
            BoxMakeWriter::new(std::io::stdout),
            file_writer,
            Some(path),
        ))
    }

    /// Build the facade over caller-supplied writers. No filesystem access.
    pub fn with_writers(
        config: LogConfig,
        console: BoxMakeWriter,
        file: BoxMakeWriter,
    ) -> Result<Self> {
        check(&config)?;
        Ok(Self::assemble(&config, console, file, None))
    }

    fn assemble(
        config: &LogConfig,
        console_writer: BoxMakeWriter,
        file_writer: BoxMakeWriter,
        file_path: Option<PathBuf>,
    ) -> Self {
        let dispatch = build_dispatch(
            &config.console,
            console_writer,
            &config.file.sink,
            file_writer,
        );
        let default_label = config
            .console
            .label
            .clone()
            .or_else(|| config.file.sink.label.clone());
        Self {
            dispatch,
            console: SinkState::new(&config.console),
            file: SinkState::new(&config.file.sink),
            default_label: RwLock::new(default_label),
            file_path,
        }
    }

    /// Path of the active log file, when writing to disk.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn console_level(&self) -> Severity {
        self.console.level.load()
    }

    pub fn file_level(&self) -> Severity {
        self.file.level.load()
    }

    /// Change the console threshold for subsequent calls.
    pub fn set_console_level(&self, level: Severity) {
        self.console.level.store(level);
    }

    /// Change the file threshold for subsequent calls.
    pub fn set_file_level(&self, level: Severity) {
        self.file.level.store(level);
    }

    /// Store the label used by records whose source location yields none.
    pub fn set_label(&self, source_location: &str, method: Option<&str>) {
        let label = compose_label(source_location, method);
        if let Ok(mut current) = self.default_label.write() {
            *current = Some(label);
        }
    }

    pub fn label(&self) -> Option<String> {
        self.default_label.read().ok().and_then(|l| l.clone())
    }

    pub(crate) fn console_handles_exceptions(&self) -> bool {
        self.console.handle_exceptions
    }

    fn resolve_label(&self, source_location: &str, method: Option<&str>) -> String {
        let label = compose_label(source_location, method);
        if label.is_empty() {
            self.label().unwrap_or_default()
        } else {
            label
        }
    }

    /// Log at `severity`, the body being `"<correlation_id> - <message>"`.
    pub fn log(
        &self,
        severity: Severity,
        source_location: &str,
        method: Option<&str>,
        correlation_id: &str,
        message: &str,
        data: Option<Payload>,
    ) {
        let to_console = severity.allows(self.console_level());
        let to_file = severity.allows(self.file_level());
        if !to_console && !to_file {
            return;
        }
        let record = LogRecord::new(
            severity,
            self.resolve_label(source_location, method),
            correlation_id,
            message,
        )
        .with_data(data);
        self.write(&record, to_console, to_file);
    }

    /// Hand a prebuilt record to the sinks whose threshold it passes.
    pub fn emit(&self, record: &LogRecord) {
        self.write(
            record,
            record.severity.allows(self.console_level()),
            record.severity.allows(self.file_level()),
        );
    }

    /// Record an uncaught failure on every sink that handles exceptions,
    /// regardless of threshold.
    pub(crate) fn emit_uncaught(&self, record: &LogRecord) {
        self.write(
            record,
            self.console.handle_exceptions,
            self.file.handle_exceptions,
        );
    }

    fn write(&self, record: &LogRecord, to_console: bool, to_file: bool) {
        tracing::dispatcher::with_default(&self.dispatch, || {
            if to_console {
                emit_record!(CONSOLE_TARGET, record);
            }
            if to_file {
                emit_record!(FILE_TARGET, record);
            }
        });
    }

    pub fn error(
        &self,
        source_location: &str,
        method: Option<&str>,
        correlation_id: &str,
        message: &str,
        data: Option<Payload>,
    ) {
        self.log(Severity::Error, source_location, method, correlation_id, message, data);
    }

    pub fn warn(
        &self,
        source_location: &str,
        method: Option<&str>,
        correlation_id: &str,
        message: &str,
        data: Option<Payload>,
    ) {
        self.log(Severity::Warn, source_location, method, correlation_id, message, data);
    }

    pub fn info(
        &self,
        source_location: &str,
        method: Option<&str>,
        correlation_id: &str,
        message: &str,
        data: Option<Payload>,
    ) {
        self.log(Severity::Info, source_location, method, correlation_id, message, data);
    }

    pub fn verbose(
        &self,
        source_location: &str,
        method: Option<&str>,
        correlation_id: &str,
        message: &str,
        data: Option<Payload>,
    ) {
        self.log(Severity::Verbose, source_location, method, correlation_id, message, data);
    }

    pub fn debug(
        &self,
        source_location: &str,
        method: Option<&str>,
        correlation_id: &str,
        message: &str,
        data: Option<Payload>,
    ) {
        self.log(Severity::Debug, source_location, method, correlation_id, message, data);
    }

    pub fn silly(
        &self,
        source_location: &str,
        method: Option<&str>,
        correlation_id: &str,
        message: &str,
        data: Option<Payload>,
    ) {
        self.log(Severity::Silly, source_location, method, correlation_id, message, data);
    }
}

fn check(config: &LogConfig) -> Result<()> {
    let report = validate(config);
    if report.is_valid() {
        Ok(())
    } else {
        Err(CorrlogError::Config(report.summary()))
    }
}
