//! Domain model for todo items and derived-view options.
//!
//! # Responsibility
//! - Define the canonical item shape used by core business logic.
//! - Define the stable option/status vocabularies shared with rendering
//!   layers.
//!
//! # Invariants
//! - Every item is identified by a stable `TodoId`.
//! - `completed == true` if and only if `completed_at` is set.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod due_date;
pub mod todo;
