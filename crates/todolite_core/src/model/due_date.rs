//! Due-date domain helpers.
//!
//! # Responsibility
//! - Validate textual `YYYY-MM-DD` due-date input at the API boundary.
//! - Classify due dates for display emphasis (overdue/due-soon/on-time).
//! - Provide the calendar predicates used by filtered views.
//!
//! # Invariants
//! - Validation accepts only zero-padded, real calendar dates.
//! - Completed items always classify as `no-due-date`, regardless of date.
//! - Week predicates treat weeks as Monday through Sunday inclusive.

use crate::model::todo::DueDateStatus;
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

static DUE_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid due date regex"));

/// Parses a `YYYY-MM-DD` due-date string into a calendar date.
///
/// Returns `None` for anything that is not zero-padded `YYYY-MM-DD` or does
/// not denote a real calendar date (`2025-02-30`, `2025-13-01`).
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    let caps = DUE_DATE_RE.captures(value)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Returns whether `value` is a valid `YYYY-MM-DD` calendar date.
pub fn is_valid_due_date(value: &str) -> bool {
    parse_due_date(value).is_some()
}

/// Classifies a due date for display emphasis using the local clock.
pub fn due_date_status(due_date: Option<NaiveDate>, completed: bool) -> DueDateStatus {
    due_date_status_at(due_date, completed, Local::now().naive_local())
}

/// Classifies a due date for display emphasis at an explicit instant.
///
/// # Contract
/// - Completed or undated items classify as `NoDueDate`.
/// - A due date strictly before `now`'s date classifies as `Overdue`.
/// - Otherwise `DueSoon` when the due date's end-of-day instant is within
///   24 hours of `now`, else `OnTime`.
pub fn due_date_status_at(
    due_date: Option<NaiveDate>,
    completed: bool,
    now: NaiveDateTime,
) -> DueDateStatus {
    if completed {
        return DueDateStatus::NoDueDate;
    }
    let due = match due_date {
        Some(due) => due,
        None => return DueDateStatus::NoDueDate,
    };

    if due < now.date() {
        return DueDateStatus::Overdue;
    }

    let end_of_day = due
        .and_hms_opt(23, 59, 59)
        .expect("23:59:59 is a valid wall-clock time");
    if end_of_day - now <= Duration::hours(24) {
        DueDateStatus::DueSoon
    } else {
        DueDateStatus::OnTime
    }
}

/// Returns whether an item is overdue on `today`.
///
/// Completed items are never overdue.
pub fn is_overdue(due_date: Option<NaiveDate>, completed: bool, today: NaiveDate) -> bool {
    match due_date {
        Some(due) if !completed => due < today,
        _ => false,
    }
}

/// Returns whether `due` falls within `today`'s Monday-Sunday week.
pub fn is_in_week_of(due: NaiveDate, today: NaiveDate) -> bool {
    let week = today.week(Weekday::Mon);
    due >= week.first_day() && due <= week.last_day()
}

/// Returns whether `due` falls within `today`'s calendar month and year.
pub fn is_in_month_of(due: NaiveDate, today: NaiveDate) -> bool {
    due.year() == today.year() && due.month() == today.month()
}

/// Formats a due date for display.
///
/// Single display-formatting hook for rendering layers; locale-aware
/// formatting can replace this without touching core logic.
pub fn format_due_date(due_date: Option<NaiveDate>) -> String {
    match due_date {
        Some(due) => due.format("%b %-d, %Y").to_string(),
        None => "no due date".to_string(),
    }
}
