//! File I/O utilities with atomic writes and advisory locking
//!
//! Provides safe file operations that won't corrupt data on failure, and a
//! lock guard that serializes read-modify-write cycles across processes.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{de::DeserializeOwned, Serialize};
use tracing::trace;

use crate::error::ExpenseError;

/// Read JSON from a file, returning a default value if the file doesn't exist
/// or contains only whitespace
pub fn read_json<T, P>(path: P) -> Result<T, ExpenseError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        trace!(path = %path.display(), "file absent, using default");
        return Ok(T::default());
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| ExpenseError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    if contents.trim().is_empty() {
        return Ok(T::default());
    }

    serde_json::from_str(&contents)
        .map_err(|e| ExpenseError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all, so a crash
/// mid-write never leaves a truncated store behind.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), ExpenseError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ExpenseError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path)
        .map_err(|e| ExpenseError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| ExpenseError::Json(format!("Failed to serialize data: {}", e)))?;
    writer.write_all(b"\n")?;

    writer
        .flush()
        .map_err(|e| ExpenseError::Io(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| ExpenseError::Io(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ExpenseError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    trace!(path = %path.display(), "wrote file");
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Advisory lock on a lock file, released when dropped
///
/// Locks are cooperative: they only exclude other processes that also take
/// the lock before touching the store.
#[derive(Debug)]
pub struct FileLock {
    file: File,
}

impl FileLock {
    /// Block until an exclusive lock is held
    pub fn exclusive(path: impl AsRef<Path>) -> Result<Self, ExpenseError> {
        let path = path.as_ref();
        let file = open_lock_file(path)?;
        FileExt::lock_exclusive(&file).map_err(|e| {
            ExpenseError::Storage(format!("Failed to lock {}: {}", path.display(), e))
        })?;
        trace!(path = %path.display(), "acquired exclusive lock");
        Ok(Self { file })
    }

    /// Block until a shared lock is held
    pub fn shared(path: impl AsRef<Path>) -> Result<Self, ExpenseError> {
        let path = path.as_ref();
        let file = open_lock_file(path)?;
        FileExt::lock_shared(&file).map_err(|e| {
            ExpenseError::Storage(format!("Failed to lock {}: {}", path.display(), e))
        })?;
        trace!(path = %path.display(), "acquired shared lock");
        Ok(Self { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

fn open_lock_file(path: &Path) -> Result<File, ExpenseError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|e| {
            ExpenseError::Io(format!("Failed to open lock file {}: {}", path.display(), e))
        })?;

    Ok(file)
}
