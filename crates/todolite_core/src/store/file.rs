//! File-backed key-value store.
//!
//! # Responsibility
//! - Map each key to one file inside a dedicated directory.
//! - Translate filesystem failures into store-level error semantics.
//!
//! # Invariants
//! - Keys never escape the store directory.
//! - A missing entry reads as `None` and removes as a no-op.
//! - `StorageFull` write failures surface as `KvError::QuotaExceeded`.

use super::{KvError, KvResult, KvStore};
use log::{error, info};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Instant;

/// Key-value store persisting each entry as a file under one directory.
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    /// Opens the store, creating its directory when missing.
    ///
    /// # Side effects
    /// - Creates the directory tree on first use.
    /// - Emits `kv_open` logging events with duration and status.
    pub fn open(dir: impl Into<PathBuf>) -> KvResult<Self> {
        let started_at = Instant::now();
        let dir = dir.into();

        if let Err(err) = fs::create_dir_all(&dir) {
            error!(
                "event=kv_open module=store status=error dir={} duration_ms={} error={}",
                dir.display(),
                started_at.elapsed().as_millis(),
                err
            );
            return Err(map_io_error(err));
        }

        info!(
            "event=kv_open module=store status=ok dir={} duration_ms={}",
            dir.display(),
            started_at.elapsed().as_millis()
        );
        Ok(Self { dir })
    }

    fn entry_path(&self, key: &str) -> KvResult<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            || key.contains("..")
        {
            return Err(KvError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let path = self.entry_path(key)?;
        match fs::read_to_string(path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(map_io_error(err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        let path = self.entry_path(key)?;
        fs::write(path, value).map_err(map_io_error)
    }

    fn remove(&mut self, key: &str) -> KvResult<()> {
        let path = self.entry_path(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(map_io_error(err)),
        }
    }
}

fn map_io_error(err: std::io::Error) -> KvError {
    if err.kind() == ErrorKind::StorageFull {
        KvError::QuotaExceeded
    } else {
        KvError::Io(err)
    }
}
