//! Synchronous key-value blob store boundary.
//!
//! # Responsibility
//! - Define the minimal get/set/remove contract the storage adapter builds
//!   on.
//! - Provide the file-backed production store and the in-memory store used
//!   by tests and embedding callers.
//!
//! # Invariants
//! - Every call is a single synchronous attempt; no retries, no caching.
//! - A store full condition is reported as `KvError::QuotaExceeded`, never
//!   as a generic I/O failure.
//!
//! # See also
//! - docs/architecture/storage.md

use std::error::Error;
use std::fmt::{Display, Formatter};

mod file;
mod memory;

pub use file::FileKvStore;
pub use memory::MemoryKvStore;

pub type KvResult<T> = Result<T, KvError>;

/// Store-level failure for key-value operations.
#[derive(Debug)]
pub enum KvError {
    /// Underlying I/O failure other than exhausted capacity.
    Io(std::io::Error),
    /// The store has no room left for the write.
    QuotaExceeded,
    /// The key cannot be represented by this store.
    InvalidKey(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::QuotaExceeded => write!(f, "key-value store quota exceeded"),
            Self::InvalidKey(key) => write!(f, "invalid key-value store key: `{key}`"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::QuotaExceeded => None,
            Self::InvalidKey(_) => None,
        }
    }
}

/// Minimal synchronous key-value store contract.
///
/// Values are opaque text blobs; callers own serialization. Implementations
/// must treat a missing key as `Ok(None)` on read and as a no-op on remove.
pub trait KvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> KvResult<()>;
    fn remove(&mut self, key: &str) -> KvResult<()>;
}
