//! Typed configuration for the two sinks.

use std::path::PathBuf;

use corrlog_core::Severity;
use serde::{Deserialize, Serialize};

/// Settings shared by the console and file sinks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Minimum severity the sink records.
    pub level: Severity,
    /// Whether uncaught panics are recorded by this sink.
    pub handle_exceptions: bool,
    /// Label used when a record arrives without a source location.
    pub label: Option<String>,
    /// Render records as JSON objects instead of plain text.
    pub json_format: bool,
    pub timestamped: bool,
    pub colorized: bool,
}

/// File sink settings: the shared fields plus the rotation limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSinkConfig {
    #[serde(flatten)]
    pub sink: SinkConfig,
    /// Size at which the active file is rolled.
    pub max_file_bytes: u64,
    /// Rotated archives kept, in addition to the active file.
    pub max_file_count: u64,
}

/// Complete facade configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    pub production: bool,
    /// Directory that receives the dated log file.
    pub log_dir: PathBuf,
    pub console: SinkConfig,
    pub file: FileSinkConfig,
}

/// Partial sink settings read from an override file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SinkOverrides {
    pub level: Option<Severity>,
    pub handle_exceptions: Option<bool>,
    pub label: Option<String>,
    pub json_format: Option<bool>,
    pub timestamped: Option<bool>,
    pub colorized: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileSinkOverrides {
    #[serde(flatten)]
    pub sink: SinkOverrides,
    pub max_file_bytes: Option<u64>,
    pub max_file_count: Option<u64>,
}

/// Every field optional; present fields replace the env-derived values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigOverrides {
    pub production: Option<bool>,
    pub log_dir: Option<PathBuf>,
    #[serde(default)]
    pub console: SinkOverrides,
    #[serde(default)]
    pub file: FileSinkOverrides,
}

impl SinkOverrides {
    pub(crate) fn apply(self, sink: &mut SinkConfig) {
        if let Some(level) = self.level {
            sink.level = level;
        }
        if let Some(v) = self.handle_exceptions {
            sink.handle_exceptions = v;
        }
        if self.label.is_some() {
            sink.label = self.label;
        }
        if let Some(v) = self.json_format {
            sink.json_format = v;
        }
        if let Some(v) = self.timestamped {
            sink.timestamped = v;
        }
        if let Some(v) = self.colorized {
            sink.colorized = v;
        }
    }
}
