use chrono::{NaiveDate, TimeZone, Utc};
use todolite_core::{DueDateStatus, FilterOption, SortOption, TodoItem};
use uuid::Uuid;

#[test]
fn new_item_starts_incomplete() {
    let item = TodoItem::new("write report", None);

    assert!(!item.id.is_nil());
    assert_eq!(item.title, "write report");
    assert!(!item.completed);
    assert_eq!(item.completed_at, None);
    assert_eq!(item.due_date, None);
}

#[test]
fn completion_helpers_keep_flag_and_timestamp_aligned() {
    let mut item = TodoItem::new("water plants", None);

    let at = Utc.with_ymd_and_hms(2025, 1, 12, 18, 0, 0).unwrap();
    item.mark_completed(at);
    assert!(item.completed);
    assert_eq!(item.completed_at, Some(at));

    item.mark_incomplete();
    assert!(!item.completed);
    assert_eq!(item.completed_at, None);
}

#[test]
fn item_serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let item = TodoItem {
        id,
        title: "ship release".to_string(),
        completed: true,
        created_at: Utc.with_ymd_and_hms(2025, 1, 10, 9, 30, 0).unwrap(),
        completed_at: Some(Utc.with_ymd_and_hms(2025, 1, 12, 18, 0, 0).unwrap()),
        due_date: Some(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()),
    };

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["title"], "ship release");
    assert_eq!(json["completed"], true);
    assert_eq!(json["createdAt"], "2025-01-10T09:30:00Z");
    assert_eq!(json["completedAt"], "2025-01-12T18:00:00Z");
    assert_eq!(json["dueDate"], "2025-01-20");

    let decoded: TodoItem = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn incomplete_item_serializes_null_completed_at() {
    let item = TodoItem::new("no timestamp yet", None);
    let json = serde_json::to_value(&item).unwrap();
    assert!(json["completedAt"].is_null());
    assert!(json["dueDate"].is_null());
}

#[test]
fn missing_due_date_field_deserializes_as_absent() {
    // Blobs persisted before the due-date field existed have no `dueDate`.
    let json = serde_json::json!({
        "id": "22222222-3333-4444-8555-666666666666",
        "title": "old item",
        "completed": false,
        "createdAt": "2024-06-01T08:00:00Z",
        "completedAt": null
    });

    let decoded: TodoItem = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.title, "old item");
    assert_eq!(decoded.due_date, None);
}

#[test]
fn sort_options_round_trip_through_stable_strings() {
    let options = [
        SortOption::CreatedAsc,
        SortOption::CreatedDesc,
        SortOption::DueDateAsc,
        SortOption::DueDateDesc,
    ];
    for option in options {
        assert_eq!(SortOption::parse(option.as_str()), Some(option));
    }
    assert_eq!(SortOption::parse("alphabetical"), None);
}

#[test]
fn filter_options_round_trip_through_stable_strings() {
    let options = [
        FilterOption::All,
        FilterOption::Overdue,
        FilterOption::Today,
        FilterOption::ThisWeek,
        FilterOption::ThisMonth,
        FilterOption::NoDueDate,
    ];
    for option in options {
        assert_eq!(FilterOption::parse(option.as_str()), Some(option));
    }
    assert_eq!(FilterOption::parse("completed"), None);
}

#[test]
fn due_date_status_exposes_stable_strings() {
    assert_eq!(DueDateStatus::Overdue.as_str(), "overdue");
    assert_eq!(DueDateStatus::DueSoon.as_str(), "due-soon");
    assert_eq!(DueDateStatus::OnTime.as_str(), "on-time");
    assert_eq!(DueDateStatus::NoDueDate.as_str(), "no-due-date");
}
