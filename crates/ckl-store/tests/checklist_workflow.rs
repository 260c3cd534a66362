//! End-to-end checklist workflows against a temporary data directory.

use std::fs;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use ckl_core::entities::Task;
use ckl_core::enums::{Action, Priority, TaskStatus};
use ckl_store::{ChecklistManager, ErrorKind, ManualClock, TaskUpdateBuilder};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 5, 20, 10, 0, 0).unwrap(),
    ))
}

#[test]
fn work_checklist_scenario() {
    let dir = TempDir::new().expect("tempdir should create");
    let mut manager = ChecklistManager::open(dir.path(), clock()).unwrap();

    manager.create("work").unwrap();
    manager.switch("work").unwrap();
    let store = manager.active_mut().unwrap();

    let task = store.add("Write spec", Priority::Medium).unwrap();
    assert_eq!(task.id, 1);

    store.set_progress(1, 50).unwrap();
    let done = store.complete(1).unwrap();
    assert!(done.completed);
    assert_eq!(done.progress, 100);

    assert_eq!(store.undo().unwrap(), Some(Action::Complete));
    let restored = store.get(1).unwrap();
    assert_eq!(restored.progress, 50);
    assert!(!restored.completed);
    assert_eq!(restored.status, TaskStatus::InProgress);

    assert_eq!(store.undo().unwrap(), None);
}

#[test]
fn state_survives_reopen() {
    let dir = TempDir::new().expect("tempdir should create");
    let clock = clock();
    let mut manager = ChecklistManager::open(dir.path(), clock.clone()).unwrap();
    manager.create("home").unwrap();
    manager.switch("home").unwrap();
    {
        let store = manager.active_mut().unwrap();
        store.add("Groceries", Priority::High).unwrap();
        store.add("Laundry", Priority::Low).unwrap();
        store
            .edit(2, TaskUpdateBuilder::new().title("Fold laundry").build())
            .unwrap();
        store.set_progress(1, 30).unwrap();
    }
    let before: Vec<Task> = manager.active().unwrap().tasks().to_vec();
    drop(manager);

    let reopened = ChecklistManager::open(dir.path(), clock).unwrap();
    assert_eq!(reopened.active_name(), "home");
    assert_eq!(reopened.active().unwrap().tasks(), before.as_slice());
    assert_eq!(reopened.active().unwrap().pending_undo(), Some(Action::SetProgress));
}

#[test]
fn timer_runs_across_invocations() {
    let dir = TempDir::new().expect("tempdir should create");
    let clock = clock();
    {
        let mut manager = ChecklistManager::open(dir.path(), clock.clone()).unwrap();
        let store = manager.active_mut().unwrap();
        store.add("Deep work", Priority::High).unwrap();
        assert!(store.start_timer(1).unwrap().changed);
    }

    clock.advance(Duration::minutes(25));

    let mut manager = ChecklistManager::open(dir.path(), clock).unwrap();
    let store = manager.active_mut().unwrap();
    assert!(store.get(1).unwrap().timer_running());
    let stopped = store.stop_timer(1).unwrap();
    assert_eq!(stopped.task.elapsed_ms, 25 * 60 * 1000);
}

#[test]
fn undo_works_across_invocations() {
    let dir = TempDir::new().expect("tempdir should create");
    let clock = clock();
    {
        let mut manager = ChecklistManager::open(dir.path(), clock.clone()).unwrap();
        let store = manager.active_mut().unwrap();
        store.add("Keep me", Priority::Medium).unwrap();
        store.delete(1).unwrap();
    }

    let mut manager = ChecklistManager::open(dir.path(), clock.clone()).unwrap();
    assert_eq!(manager.active_mut().unwrap().undo().unwrap(), Some(Action::Delete));
    drop(manager);

    let manager = ChecklistManager::open(dir.path(), clock).unwrap();
    let store = manager.active().unwrap();
    assert_eq!(store.get(1).unwrap().title, "Keep me");
    assert_eq!(store.pending_undo(), None);
}

#[test]
fn import_becomes_active() {
    let dir = TempDir::new().expect("tempdir should create");
    let source = TempDir::new().expect("tempdir should create");
    let now = Utc::now();
    let tasks = vec![
        Task::new(1, "Imported one", Priority::High, now).unwrap(),
        Task::new(2, "Imported two", Priority::Low, now).unwrap(),
    ];
    let path = source.path().join("sprint.json");
    fs::write(&path, serde_json::to_string_pretty(&tasks).unwrap()).unwrap();

    let mut manager = ChecklistManager::open(dir.path(), clock()).unwrap();
    let response = manager.import_external(&path, None).unwrap();
    assert_eq!(response.name, "sprint");
    assert_eq!(response.tasks, 2);
    assert_eq!(manager.active_name(), "sprint");
    assert!(dir.path().join("sprint.json").exists());

    let next = manager
        .active_mut()
        .unwrap()
        .add("After import", Priority::Medium)
        .unwrap();
    assert_eq!(next.id, 3);

    let err = manager.import_external(&path, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    let renamed = manager.import_external(&path, Some("sprint-2")).unwrap();
    assert_eq!(renamed.name, "sprint-2");
}

#[test]
fn import_missing_field_leaves_set_unchanged() {
    let dir = TempDir::new().expect("tempdir should create");
    let source = TempDir::new().expect("tempdir should create");
    let mut doc = serde_json::to_value(vec![
        Task::new(1, "Fine", Priority::Medium, Utc::now()).unwrap(),
    ])
    .unwrap();
    doc[0].as_object_mut().unwrap().remove("priority");
    let path = source.path().join("broken.json");
    fs::write(&path, doc.to_string()).unwrap();

    let mut manager = ChecklistManager::open(dir.path(), clock()).unwrap();
    let before = manager.list();
    let active = manager.active_name().to_string();

    let err = manager.import_external(&path, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(manager.list(), before);
    assert_eq!(manager.active_name(), active);
    assert!(!dir.path().join("broken.json").exists());
}
