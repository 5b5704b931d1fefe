//! Config validation with field paths.

use corrlog_core::Severity;
use thiserror::Error;

use crate::schema::LogConfig;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All errors joined into one line.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &LogConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_paths(config, &mut report);
    validate_rotation(config, &mut report);
    validate_levels(config, &mut report);
    report
}

fn validate_paths(config: &LogConfig, report: &mut ValidationReport) {
    if config.log_dir.as_os_str().is_empty() {
        report.error("log_dir", "Log directory cannot be empty");
    }
}

fn validate_rotation(config: &LogConfig, report: &mut ValidationReport) {
    if config.file.max_file_bytes == 0 {
        report.error("file.max_file_bytes", "Rotation size must be greater than zero");
    }
    if config.file.max_file_count == 0 {
        report.error("file.max_file_count", "At least one log file must be kept");
    }
    if config.file.sink.colorized {
        report.warn("file.colorized", "ANSI escapes will be written into the log file");
    }
}

fn validate_levels(config: &LogConfig, report: &mut ValidationReport) {
    if !config.production {
        return;
    }
    for (path, level) in [
        ("console.level", config.console.level),
        ("file.level", config.file.sink.level),
    ] {
        if level < Severity::Warn {
            report.warn(path, format!("Production sink records {level} and above"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let report = validate(&LogConfig::new(false, "/tmp/logs"));
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_zero_rotation_limits_are_errors() {
        let mut config = LogConfig::new(false, "/tmp/logs");
        config.file.max_file_bytes = 0;
        config.file.max_file_count = 0;
        let report = validate(&config);
        assert_eq!(report.errors.len(), 2);
        assert!(report.summary().contains("file.max_file_bytes"));
        assert!(report.summary().contains("file.max_file_count"));
    }

    #[test]
    fn test_empty_log_dir_is_an_error() {
        let report = validate(&LogConfig::new(false, ""));
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "log_dir");
    }

    #[test]
    fn test_chatty_production_sink_warns() {
        let mut config = LogConfig::new(true, "/tmp/logs");
        config.console.level = Severity::Debug;
        let report = validate(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].path, "console.level");
    }
}
