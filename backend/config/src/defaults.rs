//! Default values for a freshly built config.

use std::path::PathBuf;

use corrlog_core::Severity;

use crate::schema::{FileSinkConfig, LogConfig, SinkConfig};

/// Roll the active file once it reaches 16 MiB.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 16_777_216;

/// Keep at most 64 files, roughly 1 GiB of logs.
pub const DEFAULT_MAX_FILE_COUNT: u64 = 64;

/// Directory name used next to the executable.
pub const LOG_DIR_NAME: &str = "logs";

/// Threshold used by both sinks unless overridden.
pub fn default_level(production: bool) -> Severity {
    if production {
        Severity::Error
    } else {
        Severity::Silly
    }
}

/// `<dir of current executable>/logs`, or `./logs` if that cannot be resolved.
pub fn default_log_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(LOG_DIR_NAME)))
        .unwrap_or_else(|| PathBuf::from(LOG_DIR_NAME))
}

impl SinkConfig {
    pub fn console(level: Severity) -> Self {
        Self {
            level,
            handle_exceptions: true,
            label: None,
            json_format: false,
            timestamped: true,
            colorized: true,
        }
    }
}

impl FileSinkConfig {
    pub fn new(level: Severity) -> Self {
        Self {
            sink: SinkConfig {
                colorized: false,
                ..SinkConfig::console(level)
            },
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_file_count: DEFAULT_MAX_FILE_COUNT,
        }
    }
}

impl LogConfig {
    /// Defaults for the given mode, writing into `log_dir`.
    pub fn new(production: bool, log_dir: impl Into<PathBuf>) -> Self {
        let level = default_level(production);
        Self {
            production,
            log_dir: log_dir.into(),
            console: SinkConfig::console(level),
            file: FileSinkConfig::new(level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_defaults() {
        let config = LogConfig::new(false, "/tmp/logs");
        assert_eq!(config.console.level, Severity::Silly);
        assert_eq!(config.file.sink.level, Severity::Silly);
        assert!(config.console.colorized);
        assert!(!config.file.sink.colorized);
        assert!(config.console.handle_exceptions && config.file.sink.handle_exceptions);
        assert!(!config.console.json_format && !config.file.sink.json_format);
        assert_eq!(config.file.max_file_bytes, 16 * 1024 * 1024);
        assert_eq!(config.file.max_file_count, 64);
    }

    #[test]
    fn test_production_defaults_to_error() {
        let config = LogConfig::new(true, "/tmp/logs");
        assert_eq!(config.console.level, Severity::Error);
        assert_eq!(config.file.sink.level, Severity::Error);
    }

    #[test]
    fn test_default_log_dir_ends_in_logs() {
        assert!(default_log_dir().ends_with(LOG_DIR_NAME));
    }
}
