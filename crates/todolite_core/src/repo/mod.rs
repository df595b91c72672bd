//! Storage adapter layer.
//!
//! # Responsibility
//! - Define the persistence contract the engine depends on.
//! - Isolate blob serialization and key-value store details from business
//!   orchestration.
//!
//! # Invariants
//! - Adapter APIs return typed `StorageError` values instead of propagating
//!   raw store faults.
//! - Every call is a single attempt; callers decide whether to surface the
//!   error.
//!
//! # See also
//! - docs/architecture/storage.md

pub mod todo_repo;
