//! Todo engine service.
//!
//! # Responsibility
//! - Execute validated mutations against the canonical in-memory list.
//! - Persist the full list after each mutation and roll back on failure.
//! - Compute derived sorted/filtered views as fresh copies.
//!
//! # Invariants
//! - Validation and not-found failures happen before any mutation.
//! - Storage failures after a mutation trigger an exact rollback before the
//!   error is returned; callers never observe a half-committed list.
//! - Views never reorder or expose the canonical list itself.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::due_date::{is_in_month_of, is_in_week_of, is_overdue, parse_due_date};
use crate::model::todo::{FilterOption, SortOption, TodoId, TodoItem};
use crate::repo::todo_repo::{StorageError, TodoRepository};
use chrono::{Local, NaiveDate, Utc};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure modes for [`TodoService::create`].
///
/// A malformed due date is reported as `InvalidTitle`: both are rejected
/// creation input and rendering layers treat them under one code.
#[derive(Debug)]
pub enum CreateError {
    InvalidTitle(String),
    Storage(StorageError),
}

/// Failure modes for [`TodoService::toggle`].
#[derive(Debug)]
pub enum ToggleError {
    NotFound(TodoId),
    Storage(StorageError),
}

/// Failure modes for [`TodoService::delete`].
#[derive(Debug)]
pub enum DeleteError {
    NotFound(TodoId),
    Storage(StorageError),
}

/// Failure modes for [`TodoService::update_due_date`].
#[derive(Debug)]
pub enum UpdateDueDateError {
    InvalidDueDate(String),
    NotFound(TodoId),
    Storage(StorageError),
}

impl Display for CreateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(message) => write!(f, "invalid todo input: {message}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Display for ToggleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Display for DeleteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Display for UpdateDueDateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDueDate(value) => write!(f, "invalid due date: `{value}`"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CreateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::InvalidTitle(_) => None,
        }
    }
}

impl Error for ToggleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl Error for DeleteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl Error for UpdateDueDateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for CreateError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<StorageError> for ToggleError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<StorageError> for DeleteError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<StorageError> for UpdateDueDateError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Todo engine: sole owner of the canonical in-memory item list.
pub struct TodoService<R: TodoRepository> {
    repo: R,
    todos: Vec<TodoItem>,
}

impl<R: TodoRepository> TodoService<R> {
    /// Creates an engine with an empty list over the given repository.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            todos: Vec::new(),
        }
    }

    /// Replaces the in-memory list with the persisted one.
    ///
    /// On failure the in-memory list is left untouched and the storage
    /// error is surfaced unchanged.
    pub fn load_from_storage(&mut self) -> Result<(), StorageError> {
        let loaded = self.repo.load_todos()?;
        self.todos = loaded;
        Ok(())
    }

    /// Returns a defensive copy of every item in insertion order.
    pub fn list_all(&self) -> Vec<TodoItem> {
        self.todos.clone()
    }

    /// Returns a copy of the item with the given id, when present.
    pub fn get_by_id(&self, id: TodoId) -> Option<TodoItem> {
        self.todos.iter().find(|todo| todo.id == id).cloned()
    }

    /// Creates a new item, persists the list, and returns a copy of it.
    ///
    /// # Contract
    /// - `title` is trimmed; an empty result is rejected before mutation.
    /// - `due_date`, when given, must be a valid `YYYY-MM-DD` calendar date.
    /// - On save failure the just-appended item is removed again.
    pub fn create(&mut self, title: &str, due_date: Option<&str>) -> Result<TodoItem, CreateError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CreateError::InvalidTitle(
                "title must not be empty".to_string(),
            ));
        }

        let due = match due_date {
            Some(raw) => match parse_due_date(raw) {
                Some(due) => Some(due),
                None => {
                    return Err(CreateError::InvalidTitle(format!(
                        "due date `{raw}` is not a valid calendar date"
                    )));
                }
            },
            None => None,
        };

        let item = TodoItem::new(title, due);
        self.todos.push(item.clone());

        if let Err(err) = self.repo.save_todos(&self.todos) {
            self.todos.pop();
            return Err(err.into());
        }

        Ok(item)
    }

    /// Flips the completion state of the item with the given id.
    ///
    /// # Contract
    /// - `completed_at` is stamped on completion and cleared on reopening.
    /// - On save failure the pre-toggle snapshot is restored in place.
    pub fn toggle(&mut self, id: TodoId) -> Result<TodoItem, ToggleError> {
        let index = self
            .todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(ToggleError::NotFound(id))?;

        let snapshot = self.todos[index].clone();
        if snapshot.completed {
            self.todos[index].mark_incomplete();
        } else {
            self.todos[index].mark_completed(Utc::now());
        }

        if let Err(err) = self.repo.save_todos(&self.todos) {
            self.todos[index] = snapshot;
            return Err(err.into());
        }

        Ok(self.todos[index].clone())
    }

    /// Removes the item with the given id.
    ///
    /// # Contract
    /// - On save failure the removed item is re-inserted at its original
    ///   index.
    pub fn delete(&mut self, id: TodoId) -> Result<(), DeleteError> {
        let index = self
            .todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(DeleteError::NotFound(id))?;

        let removed = self.todos.remove(index);

        if let Err(err) = self.repo.save_todos(&self.todos) {
            self.todos.insert(index, removed);
            return Err(err.into());
        }

        Ok(())
    }

    /// Replaces the due date of the item with the given id.
    ///
    /// # Contract
    /// - `due_date` is validated before the existence check; neither failure
    ///   mutates anything.
    /// - Passing `None` clears the due date.
    /// - On save failure the pre-update snapshot is restored in place.
    pub fn update_due_date(
        &mut self,
        id: TodoId,
        due_date: Option<&str>,
    ) -> Result<TodoItem, UpdateDueDateError> {
        let due = match due_date {
            Some(raw) => match parse_due_date(raw) {
                Some(due) => Some(due),
                None => return Err(UpdateDueDateError::InvalidDueDate(raw.to_string())),
            },
            None => None,
        };

        let index = self
            .todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(UpdateDueDateError::NotFound(id))?;

        let snapshot = self.todos[index].clone();
        self.todos[index].due_date = due;

        if let Err(err) = self.repo.save_todos(&self.todos) {
            self.todos[index] = snapshot;
            return Err(err.into());
        }

        Ok(self.todos[index].clone())
    }

    /// Returns a freshly ordered copy of the list; the list itself is
    /// untouched.
    ///
    /// Undated items sort last under both due-date directions: "no due
    /// date" is treated as worst, not as a point on the axis. Ties fall
    /// back to `created_at` ascending, and the stable sort preserves
    /// insertion order on full ties.
    pub fn sorted_view(&self, option: SortOption) -> Vec<TodoItem> {
        let mut todos = self.todos.clone();
        match option {
            SortOption::CreatedAsc => todos.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortOption::CreatedDesc => todos.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOption::DueDateAsc => todos.sort_by(compare_due_date_asc),
            SortOption::DueDateDesc => todos.sort_by(compare_due_date_desc),
        }
        todos
    }

    /// Returns the items matching `option`, in insertion order, evaluated
    /// against the local calendar.
    pub fn filtered_view(&self, option: FilterOption) -> Vec<TodoItem> {
        self.filtered_view_on(option, Local::now().date_naive())
    }

    /// Returns the items matching `option` with `today` given explicitly.
    ///
    /// `Overdue` consults the completion flag; `Today` deliberately does
    /// not, so today's items stay visible once done.
    pub fn filtered_view_on(&self, option: FilterOption, today: NaiveDate) -> Vec<TodoItem> {
        match option {
            FilterOption::All => self.todos.clone(),
            FilterOption::Overdue => self.filter(|t| is_overdue(t.due_date, t.completed, today)),
            FilterOption::Today => self.filter(|t| t.due_date == Some(today)),
            FilterOption::ThisWeek => {
                self.filter(|t| t.due_date.is_some_and(|due| is_in_week_of(due, today)))
            }
            FilterOption::ThisMonth => {
                self.filter(|t| t.due_date.is_some_and(|due| is_in_month_of(due, today)))
            }
            FilterOption::NoDueDate => self.filter(|t| t.due_date.is_none()),
        }
    }

    fn filter(&self, predicate: impl Fn(&TodoItem) -> bool) -> Vec<TodoItem> {
        self.todos
            .iter()
            .filter(|todo| predicate(todo))
            .cloned()
            .collect()
    }
}

fn compare_due_date_asc(a: &TodoItem, b: &TodoItem) -> Ordering {
    match (a.due_date, b.due_date) {
        (None, None) => a.created_at.cmp(&b.created_at),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(due_a), Some(due_b)) => due_a
            .cmp(&due_b)
            .then_with(|| a.created_at.cmp(&b.created_at)),
    }
}

fn compare_due_date_desc(a: &TodoItem, b: &TodoItem) -> Ordering {
    match (a.due_date, b.due_date) {
        (None, None) => a.created_at.cmp(&b.created_at),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(due_a), Some(due_b)) => due_b
            .cmp(&due_a)
            .then_with(|| a.created_at.cmp(&b.created_at)),
    }
}
