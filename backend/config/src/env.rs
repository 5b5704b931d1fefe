//! Environment-derived configuration.
//!
//! Two variables are read, once:
//! - `ENV`: `production` selects the `error` threshold, anything else `silly`
//! - `CORRLOG_LOG_DIR`: replaces the directory next to the executable

use std::collections::HashMap;
use std::path::PathBuf;

use crate::defaults::default_log_dir;
use crate::schema::LogConfig;

pub const PRODUCTION_ENV_VAR: &str = "ENV";
pub const PRODUCTION_VALUE: &str = "production";
pub const LOG_DIR_ENV_VAR: &str = "CORRLOG_LOG_DIR";

impl LogConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_map(&std::env::vars().collect())
    }

    /// Load configuration from a provided map (useful for testing).
    pub fn from_env_map(env: &HashMap<String, String>) -> Self {
        let production = env
            .get(PRODUCTION_ENV_VAR)
            .is_some_and(|v| v == PRODUCTION_VALUE);
        let log_dir = env
            .get(LOG_DIR_ENV_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_log_dir);
        Self::new(production, log_dir)
    }
}
