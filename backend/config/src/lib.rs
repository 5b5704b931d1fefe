//! `corrlog-config` — configuration for the corrlog facade.
//!
//! Provides:
//! - Typed sink config (console, rotating file)
//! - Env-derived defaults (`ENV=production`, `CORRLOG_LOG_DIR`)
//! - Optional YAML overrides
//! - Validation

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use defaults::{
    default_level, default_log_dir, DEFAULT_MAX_FILE_BYTES, DEFAULT_MAX_FILE_COUNT, LOG_DIR_NAME,
};
pub use env::{LOG_DIR_ENV_VAR, PRODUCTION_ENV_VAR, PRODUCTION_VALUE};
pub use io::{apply_yaml_overrides, load_overrides, to_yaml};
pub use schema::{ConfigOverrides, FileSinkConfig, FileSinkOverrides, LogConfig, SinkConfig, SinkOverrides};
pub use validation::{validate, ConfigValidationError, ValidationReport};
