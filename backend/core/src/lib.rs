//! `corrlog-core` — shared types for the corrlog logging facade.
//!
//! Provides:
//! - The six-level [`Severity`] ordering and an atomic threshold cell
//! - Structured [`Payload`] data
//! - The immutable per-call [`LogRecord`]
//! - The [`CorrlogError`] taxonomy

pub mod error;
pub mod payload;
pub mod record;
pub mod severity;

pub use error::{CorrlogError, Result};
pub use payload::{Payload, PayloadValue};
pub use record::LogRecord;
pub use severity::{Severity, SeverityCell};
