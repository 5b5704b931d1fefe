//! The per-call log record.

use crate::payload::Payload;
use crate::severity::Severity;

/// One log call, built fresh and never shared between callers.
///
/// The label travels inside the record, so concurrent callers cannot observe
/// each other's labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub severity: Severity,
    pub label: String,
    pub correlation_id: String,
    pub message: String,
    pub data: Option<Payload>,
}

impl LogRecord {
    pub fn new(
        severity: Severity,
        label: impl Into<String>,
        correlation_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            label: label.into(),
            correlation_id: correlation_id.into(),
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Option<Payload>) -> Self {
        self.data = data;
        self
    }

    /// `"<correlation id> - <message>"`.
    pub fn body(&self) -> String {
        format!("{} - {}", self.correlation_id, self.message)
    }

    /// Rendered payload, or an empty placeholder when there is none.
    pub fn data_text(&self) -> String {
        self.data.as_ref().map(Payload::render).unwrap_or_default()
    }
}
