//! Core domain logic for todolite.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::due_date::{
    due_date_status, due_date_status_at, format_due_date, is_valid_due_date, parse_due_date,
};
pub use model::todo::{DueDateStatus, FilterOption, SortOption, TodoId, TodoItem};
pub use repo::todo_repo::{KvTodoRepository, StorageError, StorageResult, TodoRepository};
pub use service::todo_service::{
    CreateError, DeleteError, TodoService, ToggleError, UpdateDueDateError,
};
pub use store::{FileKvStore, KvError, KvResult, KvStore, MemoryKvStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
