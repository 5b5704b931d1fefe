//! `corrlog` — console and rotating-file logging with labels and correlation ids.
//!
//! Each leveled call takes the caller's source path, an optional method name,
//! a correlation id, a message and optional structured data:
//!
//! ```no_run
//! use corrlog::{LogConfig, LogFacade, Payload};
//!
//! let logger = LogFacade::new(LogConfig::from_env())?;
//! logger.info(file!(), Some("handler"), "req-42", "started", Some(Payload::new().with("a", 1)));
//! # Ok::<(), corrlog::CorrlogError>(())
//! ```

pub mod facade;
pub mod global;
pub mod label;
pub mod sinks;
pub mod writer;

pub use corrlog_config::{FileSinkConfig, LogConfig, SinkConfig};
pub use corrlog_core::{CorrlogError, LogRecord, Payload, PayloadValue, Result, Severity};
pub use facade::LogFacade;
pub use global::{global, init, init_from_env, UNCAUGHT_CORRELATION_ID};
pub use label::{compose_label, derive_label};
pub use writer::logs_file_name;
