//! Todo persistence contract and key-value blob implementation.
//!
//! # Responsibility
//! - Persist and retrieve the entire todo list as one JSON blob under a
//!   fixed key.
//! - Report availability, quota, and decode failures as typed outcomes.
//!
//! # Invariants
//! - A missing blob loads as the empty list; only an undecodable blob is a
//!   `Parse` failure.
//! - Items persisted before the due-date field existed load with the field
//!   absent.
//!
//! # See also
//! - docs/architecture/storage.md

use crate::model::todo::TodoItem;
use crate::store::{KvError, KvStore};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Fixed key the whole todo list is persisted under.
const TODOS_KEY: &str = "todos";
/// Throwaway key written and removed by the availability probe.
const PROBE_KEY: &str = "__storage_probe__";

pub type StorageResult<T> = Result<T, StorageError>;

/// Typed outcome for storage adapter failures.
#[derive(Debug)]
pub enum StorageError {
    /// The underlying store is not usable, or a write failed for a reason
    /// other than exhausted capacity.
    Unavailable(String),
    /// The store has no room left for the blob.
    QuotaExceeded,
    /// A persisted blob exists but cannot be decoded.
    Parse(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "storage is unavailable: {message}"),
            Self::QuotaExceeded => write!(f, "storage quota exceeded"),
            Self::Parse(message) => write!(f, "failed to parse persisted todos: {message}"),
        }
    }
}

impl Error for StorageError {}

/// Persistence contract for the todo engine.
///
/// Implementations persist the full list wholesale; there is no per-item
/// write path.
pub trait TodoRepository {
    /// Probes the underlying store and reports whether it is usable.
    /// Never fails.
    fn check_available(&mut self) -> bool;
    fn save_todos(&mut self, todos: &[TodoItem]) -> StorageResult<()>;
    fn load_todos(&mut self) -> StorageResult<Vec<TodoItem>>;
    fn clear_todos(&mut self) -> StorageResult<()>;
}

/// Storage adapter persisting todos as one JSON blob in a key-value store.
pub struct KvTodoRepository<S: KvStore> {
    store: S,
}

impl<S: KvStore> KvTodoRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrows the underlying store, mainly for inspection in tests.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrows the underlying store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

impl<S: KvStore> TodoRepository for KvTodoRepository<S> {
    fn check_available(&mut self) -> bool {
        self.store.set(PROBE_KEY, "probe").is_ok() && self.store.remove(PROBE_KEY).is_ok()
    }

    fn save_todos(&mut self, todos: &[TodoItem]) -> StorageResult<()> {
        let started_at = Instant::now();
        if !self.check_available() {
            error!("event=todos_save module=repo status=error error_code=storage_unavailable");
            return Err(StorageError::Unavailable(
                "key-value store failed the availability probe".to_string(),
            ));
        }

        let blob = match serde_json::to_string(todos) {
            Ok(blob) => blob,
            Err(err) => {
                error!(
                    "event=todos_save module=repo status=error error_code=serialize_failed error={err}"
                );
                return Err(StorageError::Unavailable(format!(
                    "failed to serialize todos: {err}"
                )));
            }
        };

        match self.store.set(TODOS_KEY, &blob) {
            Ok(()) => {
                info!(
                    "event=todos_save module=repo status=ok count={} duration_ms={}",
                    todos.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(KvError::QuotaExceeded) => {
                error!("event=todos_save module=repo status=error error_code=quota_exceeded");
                Err(StorageError::QuotaExceeded)
            }
            Err(err) => {
                error!(
                    "event=todos_save module=repo status=error error_code=store_write_failed error={err}"
                );
                Err(StorageError::Unavailable(err.to_string()))
            }
        }
    }

    fn load_todos(&mut self) -> StorageResult<Vec<TodoItem>> {
        let started_at = Instant::now();
        if !self.check_available() {
            error!("event=todos_load module=repo status=error error_code=storage_unavailable");
            return Err(StorageError::Unavailable(
                "key-value store failed the availability probe".to_string(),
            ));
        }

        let blob = match self.store.get(TODOS_KEY) {
            Ok(Some(blob)) => blob,
            // First run: nothing persisted yet.
            Ok(None) => {
                info!(
                    "event=todos_load module=repo status=ok count=0 duration_ms={} first_run=true",
                    started_at.elapsed().as_millis()
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=todos_load module=repo status=error error_code=store_read_failed error={err}"
                );
                return Err(StorageError::Unavailable(err.to_string()));
            }
        };

        match serde_json::from_str::<Vec<TodoItem>>(&blob) {
            Ok(todos) => {
                info!(
                    "event=todos_load module=repo status=ok count={} duration_ms={}",
                    todos.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(todos)
            }
            Err(err) => {
                error!(
                    "event=todos_load module=repo status=error error_code=parse_failed error={err}"
                );
                Err(StorageError::Parse(err.to_string()))
            }
        }
    }

    fn clear_todos(&mut self) -> StorageResult<()> {
        if !self.check_available() {
            error!("event=todos_clear module=repo status=error error_code=storage_unavailable");
            return Err(StorageError::Unavailable(
                "key-value store failed the availability probe".to_string(),
            ));
        }

        match self.store.remove(TODOS_KEY) {
            Ok(()) => {
                info!("event=todos_clear module=repo status=ok");
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=todos_clear module=repo status=error error_code=store_remove_failed error={err}"
                );
                Err(StorageError::Unavailable(err.to_string()))
            }
        }
    }
}
