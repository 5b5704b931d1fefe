//! The process-wide facade and uncaught-panic capture.

use std::sync::{Mutex, OnceLock, PoisonError};

use corrlog_config::LogConfig;
use corrlog_core::{CorrlogError, LogRecord, Payload, Result, Severity};

use crate::facade::LogFacade;
use crate::label::derive_label;

/// Correlation id attached to records produced by the panic hook.
pub const UNCAUGHT_CORRELATION_ID: &str = "uncaught";

static GLOBAL: OnceLock<LogFacade> = OnceLock::new();

/// Serializes `init` so only one facade is ever built.
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Create the process-wide facade and route uncaught panics through it.
///
/// Fails with [`CorrlogError::AlreadyInitialized`] on every call after the
/// first successful one; the existing instance is left as it was.
pub fn init(config: LogConfig) -> Result<&'static LogFacade> {
    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if GLOBAL.get().is_some() {
        return Err(CorrlogError::AlreadyInitialized);
    }
    let facade = LogFacade::new(config)?;
    if GLOBAL.set(facade).is_err() {
        return Err(CorrlogError::AlreadyInitialized);
    }
    let Some(facade) = GLOBAL.get() else {
        return Err(CorrlogError::AlreadyInitialized);
    };
    install_panic_hook(facade);
    Ok(facade)
}

/// [`init`] with [`LogConfig::from_env`].
pub fn init_from_env() -> Result<&'static LogFacade> {
    init(LogConfig::from_env())
}

/// The process-wide facade, if [`init`] has succeeded.
pub fn global() -> Option<&'static LogFacade> {
    GLOBAL.get()
}

fn install_panic_hook(facade: &'static LogFacade) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let message = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic with a non-string payload".to_string());

        let (label, data) = match info.location() {
            Some(location) => (
                derive_label(location.file()),
                Some(
                    Payload::new()
                        .with("line", location.line())
                        .with("column", location.column()),
                ),
            ),
            None => (facade.label().unwrap_or_default(), None),
        };
        let record = LogRecord::new(Severity::Error, label, UNCAUGHT_CORRELATION_ID, message)
            .with_data(data);
        facade.emit_uncaught(&record);

        if !facade.console_handles_exceptions() {
            previous(info);
        }
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    // The only test in this crate that touches process-wide state.
    #[test]
    fn test_init_once_and_capture_panics() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let mut config = LogConfig::new(false, &log_dir);
        config.console.handle_exceptions = false;
        config.console.level = Severity::Error;

        let outcomes: Vec<Result<&'static LogFacade>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let config = config.clone();
                    scope.spawn(move || init(config))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(outcomes
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, CorrlogError::AlreadyInitialized)));

        let facade = global().unwrap();
        assert!(outcomes
            .iter()
            .filter_map(|r| r.as_ref().ok())
            .all(|f| std::ptr::eq(*f, facade)));
        assert!(matches!(init(config), Err(CorrlogError::AlreadyInitialized)));

        let result = std::panic::catch_unwind(|| panic!("worker exploded"));
        assert!(result.is_err());

        assert!(facade.file_path().unwrap().starts_with(&log_dir));
        let mut contents = String::new();
        for entry in std::fs::read_dir(&log_dir).unwrap() {
            contents.push_str(&std::fs::read_to_string(entry.unwrap().path()).unwrap());
        }
        let line = contents
            .lines()
            .find(|l| l.contains("uncaught - worker exploded"))
            .expect("panic record in file");
        assert!(line.contains("label=src/global.rs"), "{line}");
        assert!(line.contains("severity=error"), "{line}");
        assert!(line.contains(r#""line":"#), "{line}");
    }
}
