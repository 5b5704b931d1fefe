//! Rotating file transport.
//!
//! The active file is `logs_<UTC date>_.log`. logroller rolls it once it
//! reaches the configured size and evicts the oldest files beyond the count.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use corrlog_config::FileSinkConfig;
use corrlog_core::{CorrlogError, Result};
use logroller::{LogRoller, LogRollerBuilder, Rotation, RotationSize};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;

/// File name for the given UTC date: `logs_YYYY-MM-DD_.log`.
pub fn logs_file_name(date: NaiveDate) -> String {
    format!("logs_{}_.log", date.format("%Y-%m-%d"))
}

/// File name for today, evaluated once per facade.
pub fn todays_file_name() -> String {
    logs_file_name(Utc::now().date_naive())
}

/// Create `dir` if it is missing. An existing directory is left untouched.
pub fn ensure_log_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| CorrlogError::CreateDirectory {
        path: dir.to_path_buf(),
        source,
    })
}

fn rotation_size(bytes: u64) -> RotationSize {
    if bytes % MIB == 0 {
        RotationSize::MB(bytes / MIB)
    } else if bytes % KIB == 0 {
        RotationSize::KB(bytes / KIB)
    } else {
        RotationSize::Bytes(bytes)
    }
}

/// Open the size-rotated file and wrap it for use as a tracing writer.
///
/// Returns the writer together with the path of the active file.
pub fn open_file_writer(dir: &Path, config: &FileSinkConfig) -> Result<(BoxMakeWriter, PathBuf)> {
    let file_name = todays_file_name();
    let path = dir.join(&file_name);
    let dir_str = dir.to_str().ok_or_else(|| CorrlogError::OpenLogFile {
        path: path.clone(),
        message: "log directory is not valid UTF-8".to_string(),
    })?;

    let roller: LogRoller = LogRollerBuilder::new(dir_str, &file_name)
        .rotation(Rotation::SizeBased(rotation_size(config.max_file_bytes)))
        .max_keep_files(config.max_file_count as _)
        // Rotation renames to `.pending.N` and a worker shifts the archives;
        // waiting for it keeps short-lived processes within the retention limit.
        .graceful_shutdown(true)
        .build()
        .map_err(|e| CorrlogError::OpenLogFile {
            path: path.clone(),
            message: e.to_string(),
        })?;

    let writer = BoxMakeWriter::new(Mutex::new(FailSafeWriter::new(roller)));
    Ok((writer, path))
}

/// Swallows write failures so a broken file sink never reaches callers.
///
/// The first failure prints one notice to stderr; later failures stay quiet
/// until a write succeeds again.
#[derive(Debug)]
pub struct FailSafeWriter<W> {
    inner: W,
    failing: bool,
}

impl<W: Write> FailSafeWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            failing: false,
        }
    }

    pub fn is_failing(&self) -> bool {
        self.failing
    }

    fn report(&mut self, err: &io::Error) {
        if !self.failing {
            self.failing = true;
            eprintln!("corrlog: file sink write failed ({err}); suppressing further notices");
        }
    }
}

impl<W: Write> Write for FailSafeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Each call carries one whole formatted record.
        match self.inner.write_all(buf).and_then(|()| self.inner.flush()) {
            Ok(()) => self.failing = false,
            Err(err) => self.report(&err),
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Err(err) = self.inner.flush() {
            self.report(&err);
        }
        Ok(())
    }
}
