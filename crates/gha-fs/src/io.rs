//! Atomic I/O operations with file locking

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file with locking.
///
/// Writes to a uniquely named temp file in the target directory, then renames
/// it over `path`. The temp file is removed if any step fails, and concurrent
/// writers to the same path never share a temp file.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    let parent = match native_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|e| Error::io(&parent, e))?;

    let mut temp_file = tempfile::Builder::new()
        .prefix(".gha-")
        .suffix(".tmp")
        .tempfile_in(&parent)
        .map_err(|e| Error::io(&parent, e))?;

    temp_file.as_file().lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_file.path(), e))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| Error::io(temp_file.path(), e))?;

    temp_file.as_file().unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    temp_file
        .persist(&native_path)
        .map_err(|e| Error::io(&native_path, e.error))?;

    tracing::debug!(path = %path, bytes = content.len(), "Wrote file atomically");
    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read text content from a file, treating a missing file as `None`.
pub fn read_text_if_exists(path: &NormalizedPath) -> Result<Option<String>> {
    match read_text(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Append text to a file, creating it if needed.
///
/// Holds an exclusive lock for the duration of the write so that concurrent
/// appenders (several steps exporting to the same env file) do not interleave.
pub fn append_text(path: &NormalizedPath, content: &str) -> Result<()> {
    let native_path = path.to_native();

    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&native_path)
        .map_err(|e| Error::io(&native_path, e))?;

    file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    file.write_all(content.as_bytes())
        .map_err(|e| Error::io(&native_path, e))?;
    file.flush().map_err(|e| Error::io(&native_path, e))?;

    file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    Ok(())
}
