//! YAML override files.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::defaults::default_level;
use crate::schema::{ConfigOverrides, LogConfig};

/// Apply the overrides in a YAML document on top of `config`.
///
/// Switching `production` resets both thresholds to that mode's default
/// before any explicit `level` is applied.
pub fn apply_yaml_overrides(mut config: LogConfig, raw: &str) -> Result<LogConfig> {
    if raw.trim().is_empty() {
        return Ok(config);
    }
    let overrides: ConfigOverrides =
        serde_yaml::from_str(raw).context("Failed to parse logging overrides YAML")?;

    if let Some(production) = overrides.production {
        if production != config.production {
            let level = default_level(production);
            config.console.level = level;
            config.file.sink.level = level;
        }
        config.production = production;
    }
    if let Some(dir) = overrides.log_dir {
        config.log_dir = dir;
    }
    overrides.console.apply(&mut config.console);
    overrides.file.sink.apply(&mut config.file.sink);
    if let Some(bytes) = overrides.file.max_file_bytes {
        config.file.max_file_bytes = bytes;
    }
    if let Some(count) = overrides.file.max_file_count {
        config.file.max_file_count = count;
    }
    Ok(config)
}

/// Read an override file and apply it.
///
/// Returns `config` unchanged if the file doesn't exist.
pub fn load_overrides(config: LogConfig, path: &Path) -> Result<LogConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Override file does not exist; keeping env config");
        return Ok(config);
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read override file: {}", path.display()))?;
    let config = apply_yaml_overrides(config, &raw)
        .with_context(|| format!("Invalid override file: {}", path.display()))?;
    info!(path = %path.display(), "Applied logging overrides");
    Ok(config)
}

/// Render the effective config as YAML.
pub fn to_yaml(config: &LogConfig) -> Result<String> {
    serde_yaml::to_string(config).context("Failed to serialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use corrlog_core::Severity;
    use std::path::PathBuf;

    fn base() -> LogConfig {
        LogConfig::new(false, "/tmp/logs")
    }

    #[test]
    fn test_sink_fields_are_overridden() {
        let raw = r#"
log_dir: /srv/logs
console:
  level: warn
  colorized: false
file:
  json_format: true
  max_file_bytes: 1024
  max_file_count: 3
"#;
        let config = apply_yaml_overrides(base(), raw).unwrap();
        assert_eq!(config.log_dir, PathBuf::from("/srv/logs"));
        assert_eq!(config.console.level, Severity::Warn);
        assert!(!config.console.colorized);
        assert!(config.file.sink.json_format);
        assert_eq!(config.file.sink.level, Severity::Silly);
        assert_eq!(config.file.max_file_bytes, 1024);
        assert_eq!(config.file.max_file_count, 3);
    }

    #[test]
    fn test_production_switch_resets_levels_before_explicit_ones() {
        let raw = "production: true\nfile:\n  level: info\n";
        let config = apply_yaml_overrides(base(), raw).unwrap();
        assert!(config.production);
        assert_eq!(config.console.level, Severity::Error);
        assert_eq!(config.file.sink.level, Severity::Info);
    }

    #[test]
    fn test_empty_document_is_a_no_op() {
        assert_eq!(apply_yaml_overrides(base(), "  \n").unwrap(), base());
    }

    #[test]
    fn test_bad_level_is_rejected() {
        assert!(apply_yaml_overrides(base(), "console:\n  level: loud\n").is_err());
    }

    #[test]
    fn test_missing_file_keeps_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_overrides(base(), &dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config, base());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logging.yaml");
        std::fs::write(&path, "console:\n  level: debug\n").unwrap();
        let config = load_overrides(base(), &path).unwrap();
        assert_eq!(config.console.level, Severity::Debug);
    }

    #[test]
    fn test_yaml_output_flattens_file_sink() {
        let yaml = to_yaml(&base()).unwrap();
        assert!(yaml.contains("max_file_bytes: 16777216"));
        assert!(yaml.contains("level: silly"));
    }
}
