use chrono::NaiveDate;
use tempfile::tempdir;
use todolite_core::{
    CreateError, DeleteError, FileKvStore, KvTodoRepository, MemoryKvStore, TodoService,
    ToggleError, UpdateDueDateError,
};
use uuid::Uuid;

fn memory_engine() -> TodoService<KvTodoRepository<MemoryKvStore>> {
    TodoService::new(KvTodoRepository::new(MemoryKvStore::new()))
}

#[test]
fn create_returns_incomplete_item_with_trimmed_title() {
    let mut service = memory_engine();

    let item = service.create("  Buy milk  ", None).unwrap();

    assert_eq!(item.title, "Buy milk");
    assert!(!item.completed);
    assert_eq!(item.completed_at, None);
    assert_eq!(item.due_date, None);
}

#[test]
fn create_rejects_empty_and_whitespace_titles() {
    let mut service = memory_engine();

    let err = service.create("", None).unwrap_err();
    assert!(matches!(err, CreateError::InvalidTitle(_)));

    let err = service.create("   ", None).unwrap_err();
    assert!(matches!(err, CreateError::InvalidTitle(_)));

    assert!(service.list_all().is_empty());
}

#[test]
fn create_reports_malformed_due_date_as_invalid_title() {
    let mut service = memory_engine();

    let err = service.create("Pay rent", Some("2025-02-30")).unwrap_err();
    assert!(matches!(err, CreateError::InvalidTitle(_)));

    let err = service.create("Pay rent", Some("2025-1-5")).unwrap_err();
    assert!(matches!(err, CreateError::InvalidTitle(_)));

    assert!(service.list_all().is_empty());
}

#[test]
fn create_accepts_a_valid_due_date() {
    let mut service = memory_engine();

    let item = service.create("Pay rent", Some("2025-03-01")).unwrap();

    assert_eq!(item.due_date, NaiveDate::from_ymd_opt(2025, 3, 1));
}

#[test]
fn create_assigns_unique_ids_and_non_decreasing_timestamps() {
    let mut service = memory_engine();

    let first = service.create("one", None).unwrap();
    let second = service.create("two", None).unwrap();
    let third = service.create("three", None).unwrap();

    assert_ne!(first.id, second.id);
    assert_ne!(second.id, third.id);
    assert!(first.created_at <= second.created_at);
    assert!(second.created_at <= third.created_at);
}

#[test]
fn get_by_id_finds_existing_items_only() {
    let mut service = memory_engine();

    let item = service.create("find me", None).unwrap();

    assert_eq!(service.get_by_id(item.id).unwrap().title, "find me");
    assert!(service.get_by_id(Uuid::new_v4()).is_none());
}

#[test]
fn toggle_twice_is_an_involution() {
    let mut service = memory_engine();
    let item = service.create("flip me", None).unwrap();

    let completed = service.toggle(item.id).unwrap();
    assert!(completed.completed);
    assert!(completed.completed_at.is_some());

    let reopened = service.toggle(item.id).unwrap();
    assert_eq!(reopened.completed, item.completed);
    assert_eq!(reopened.completed_at, item.completed_at);
}

#[test]
fn toggle_unknown_id_returns_not_found() {
    let mut service = memory_engine();

    let missing = Uuid::new_v4();
    let err = service.toggle(missing).unwrap_err();
    assert!(matches!(err, ToggleError::NotFound(id) if id == missing));
}

#[test]
fn delete_removes_exactly_one_item() {
    let mut service = memory_engine();
    let kept = service.create("keep", None).unwrap();
    let removed = service.create("drop", None).unwrap();

    service.delete(removed.id).unwrap();

    assert_eq!(service.list_all().len(), 1);
    assert!(service.get_by_id(removed.id).is_none());
    assert!(service.get_by_id(kept.id).is_some());
}

#[test]
fn delete_unknown_id_returns_not_found() {
    let mut service = memory_engine();

    let missing = Uuid::new_v4();
    let err = service.delete(missing).unwrap_err();
    assert!(matches!(err, DeleteError::NotFound(id) if id == missing));
}

#[test]
fn update_due_date_sets_replaces_and_clears() {
    let mut service = memory_engine();
    let item = service.create("schedule me", None).unwrap();

    let updated = service.update_due_date(item.id, Some("2025-03-01")).unwrap();
    assert_eq!(updated.due_date, NaiveDate::from_ymd_opt(2025, 3, 1));

    let updated = service.update_due_date(item.id, Some("2025-04-15")).unwrap();
    assert_eq!(updated.due_date, NaiveDate::from_ymd_opt(2025, 4, 15));

    let cleared = service.update_due_date(item.id, None).unwrap();
    assert_eq!(cleared.due_date, None);
}

#[test]
fn update_due_date_validates_before_the_existence_check() {
    let mut service = memory_engine();

    // A malformed date on an unknown id reports the date problem.
    let err = service
        .update_due_date(Uuid::new_v4(), Some("2025-02-30"))
        .unwrap_err();
    assert!(matches!(err, UpdateDueDateError::InvalidDueDate(_)));

    let err = service.update_due_date(Uuid::new_v4(), None).unwrap_err();
    assert!(matches!(err, UpdateDueDateError::NotFound(_)));
}

#[test]
fn returned_items_are_defensive_copies() {
    let mut service = memory_engine();
    let mut item = service.create("original", None).unwrap();

    item.title.push_str(" mutated");
    let mut listed = service.list_all();
    listed[0].completed = true;

    assert_eq!(service.get_by_id(item.id).unwrap().title, "original");
    assert!(!service.list_all()[0].completed);
}

#[test]
fn load_from_storage_replaces_the_in_memory_list() {
    let dir = tempdir().unwrap();

    let mut first = TodoService::new(KvTodoRepository::new(
        FileKvStore::open(dir.path()).unwrap(),
    ));
    first.load_from_storage().unwrap();
    first.create("mine", None).unwrap();

    // A second engine over the same blob appends another item.
    let mut second = TodoService::new(KvTodoRepository::new(
        FileKvStore::open(dir.path()).unwrap(),
    ));
    second.load_from_storage().unwrap();
    second.create("theirs", None).unwrap();

    first.load_from_storage().unwrap();

    let titles: Vec<String> = first.list_all().into_iter().map(|t| t.title).collect();
    assert_eq!(titles, vec!["mine", "theirs"]);
}

#[test]
fn state_survives_a_reload_through_storage() {
    let dir = tempdir().unwrap();

    let first_id = {
        let store = FileKvStore::open(dir.path()).unwrap();
        let mut service = TodoService::new(KvTodoRepository::new(store));
        service.load_from_storage().unwrap();
        let item = service.create("durable", Some("2025-06-01")).unwrap();
        service.toggle(item.id).unwrap();
        item.id
    };

    let store = FileKvStore::open(dir.path()).unwrap();
    let mut service = TodoService::new(KvTodoRepository::new(store));
    service.load_from_storage().unwrap();

    let reloaded = service.get_by_id(first_id).unwrap();
    assert_eq!(reloaded.title, "durable");
    assert!(reloaded.completed);
    assert!(reloaded.completed_at.is_some());
    assert_eq!(reloaded.due_date, NaiveDate::from_ymd_opt(2025, 6, 1));
}

#[test]
fn full_lifecycle_scenario() {
    let mut service = memory_engine();

    let item = service.create("Buy milk", None).unwrap();
    assert!(matches!(
        service.create("", None),
        Err(CreateError::InvalidTitle(_))
    ));

    let completed = service.toggle(item.id).unwrap();
    assert!(completed.completed);
    assert!(completed.completed_at.is_some());

    let reopened = service.toggle(item.id).unwrap();
    assert!(!reopened.completed);
    assert_eq!(reopened.completed_at, None);

    service.delete(item.id).unwrap();
    assert!(service.list_all().is_empty());
}
