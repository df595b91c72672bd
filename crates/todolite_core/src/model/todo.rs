//! Todo item domain model.
//!
//! # Responsibility
//! - Define the canonical todo record and its persisted wire form.
//! - Provide lifecycle helpers that keep completion state consistent.
//! - Define the sort/filter/status vocabularies used by derived views.
//!
//! # Invariants
//! - `id` is stable and never reused for another item.
//! - `completed` and `completed_at` change together, never independently.
//! - `created_at` is assigned once at construction and never rewritten.
//!
//! # See also
//! - docs/architecture/data-model.md

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a todo item.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TodoId = Uuid;

/// Canonical todo record.
///
/// The serde representation is the persisted wire form: camelCase field
/// names, RFC 3339 timestamps, `YYYY-MM-DD` due dates. `due_date` defaults
/// to absent on deserialization so blobs written before the field existed
/// still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Stable global ID assigned at creation.
    pub id: TodoId,
    /// Non-empty (post-trim) display text.
    pub title: String,
    /// Completion flag; authoritative together with `completed_at`.
    pub completed: bool,
    /// Creation instant, immutable for the item lifetime.
    pub created_at: DateTime<Utc>,
    /// Set on transition to completed, cleared on transition back.
    pub completed_at: Option<DateTime<Utc>>,
    /// Optional calendar due date, no time component.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl TodoItem {
    /// Creates a new incomplete item with a generated stable ID.
    ///
    /// # Invariants
    /// - `completed` starts `false` with `completed_at` absent.
    /// - `created_at` is stamped from the current UTC clock.
    pub fn new(title: impl Into<String>, due_date: Option<NaiveDate>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            completed: false,
            created_at: Utc::now(),
            completed_at: None,
            due_date,
        }
    }

    /// Marks this item completed at the given instant.
    pub fn mark_completed(&mut self, at: DateTime<Utc>) {
        self.completed = true;
        self.completed_at = Some(at);
    }

    /// Reopens this item, clearing the completion instant.
    pub fn mark_incomplete(&mut self) {
        self.completed = false;
        self.completed_at = None;
    }
}

/// Ordering applied by [`sorted_view`](crate::service::TodoService::sorted_view).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOption {
    /// Oldest creation first.
    CreatedAsc,
    /// Newest creation first.
    CreatedDesc,
    /// Earliest due date first; undated items always last.
    DueDateAsc,
    /// Latest due date first; undated items still last.
    DueDateDesc,
}

/// Predicate applied by [`filtered_view`](crate::service::TodoService::filtered_view).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOption {
    All,
    /// Incomplete items whose due date is strictly before today.
    Overdue,
    /// Items due exactly today, completed or not.
    Today,
    /// Items due within the current Monday-Sunday week.
    ThisWeek,
    /// Items due within the current calendar month.
    ThisMonth,
    NoDueDate,
}

/// Derived display classification for due-date emphasis.
///
/// Not persisted and not a filter predicate; rendering layers use it for
/// highlighting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueDateStatus {
    Overdue,
    DueSoon,
    OnTime,
    NoDueDate,
}

impl SortOption {
    /// Stable string id used by rendering layers and CLI arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAsc => "created-asc",
            Self::CreatedDesc => "created-desc",
            Self::DueDateAsc => "due-date-asc",
            Self::DueDateDesc => "due-date-desc",
        }
    }

    /// Parses one sort option from its stable string id.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "created-asc" => Some(Self::CreatedAsc),
            "created-desc" => Some(Self::CreatedDesc),
            "due-date-asc" => Some(Self::DueDateAsc),
            "due-date-desc" => Some(Self::DueDateDesc),
            _ => None,
        }
    }
}

impl FilterOption {
    /// Stable string id used by rendering layers and CLI arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Overdue => "overdue",
            Self::Today => "today",
            Self::ThisWeek => "this-week",
            Self::ThisMonth => "this-month",
            Self::NoDueDate => "no-due-date",
        }
    }

    /// Parses one filter option from its stable string id.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "overdue" => Some(Self::Overdue),
            "today" => Some(Self::Today),
            "this-week" => Some(Self::ThisWeek),
            "this-month" => Some(Self::ThisMonth),
            "no-due-date" => Some(Self::NoDueDate),
            _ => None,
        }
    }
}

impl DueDateStatus {
    /// Stable string id used by rendering layers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::DueSoon => "due-soon",
            Self::OnTime => "on-time",
            Self::NoDueDate => "no-due-date",
        }
    }
}
