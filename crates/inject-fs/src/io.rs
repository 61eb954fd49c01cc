//! Atomic I/O operations with file locking

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::time::Duration;

use backoff::ExponentialBackoff;
use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Retry policy for transient filesystem failures.
///
/// Editors, indexers and virus scanners briefly hold files open; a write
/// that fails with a transient error is retried with exponential backoff
/// until `max_elapsed` has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobustnessConfig {
    /// Retry transient failures at all
    pub retry: bool,
    /// First delay between attempts
    pub initial_interval: Duration,
    /// Give up once this much time has been spent retrying
    pub max_elapsed: Duration,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            retry: true,
            initial_interval: Duration::from_millis(20),
            max_elapsed: Duration::from_secs(2),
        }
    }
}

impl RobustnessConfig {
    /// A policy that fails on the first error.
    pub fn no_retry() -> Self {
        Self {
            retry: false,
            ..Self::default()
        }
    }

    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.initial_interval,
            max_elapsed_time: Some(self.max_elapsed),
            ..ExponentialBackoff::default()
        }
    }
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
/// Acquires an advisory lock to prevent concurrent access. An existing
/// file keeps its permissions, and a symlink keeps pointing at its target,
/// which receives the new content.
pub fn write_atomic(path: &NormalizedPath, content: &[u8], config: RobustnessConfig) -> Result<()> {
    if !config.retry {
        return write_once(path, content);
    }

    backoff::retry(config.backoff(), || {
        write_once(path, content).map_err(|e| {
            if e.is_transient() {
                tracing::debug!(path = %path, error = %e, "Retrying transient write failure");
                backoff::Error::transient(e)
            } else {
                backoff::Error::permanent(e)
            }
        })
    })
    .map_err(|e| match e {
        backoff::Error::Permanent(err) => err,
        backoff::Error::Transient { err, .. } => err,
    })
}

fn write_once(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    // Write through symlinks so the link survives and its target is updated
    let native_path = match dunce::canonicalize(path.to_native()) {
        Ok(resolved) => resolved,
        Err(_) => path.to_native(),
    };
    let permissions = fs::metadata(&native_path).ok().map(|m| m.permissions());

    // Ensure parent directory exists
    if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file in the same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: native_path.clone(),
        })?;

    let written = temp_file
        .write_all(content)
        .and_then(|()| temp_file.sync_all())
        .and_then(|()| match &permissions {
            Some(permissions) => temp_file.set_permissions(permissions.clone()),
            None => Ok(()),
        })
        .map_err(|e| Error::io(&temp_path, e));
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    FileExt::unlock(&temp_file).map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    fs::rename(&temp_path, &native_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::io(&native_path, e)
    })?;

    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str, config: RobustnessConfig) -> Result<()> {
    write_atomic(path, content.as_bytes(), config)
}
