use std::path::Path;

use anyhow::{bail, Result};
use corrlog_config::{load_overrides, validate, LogConfig};

/// Env-derived config with an optional YAML override file on top.
pub fn load(overrides: Option<&Path>) -> Result<LogConfig> {
    let config = LogConfig::from_env();
    let config = match overrides {
        Some(path) => load_overrides(config, path)?,
        None => config,
    };

    let report = validate(&config);
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
    if !report.is_valid() {
        bail!("invalid logging config: {}", report.summary());
    }
    Ok(config)
}
