use taskdeck::idgen::SequenceIdSource;
use taskdeck::schema::CreateTask;
use taskdeck::storage::{JsonFileStore, MemoryStore, PersistedState, StateStore, STATE_SCHEMA_VERSION};
use taskdeck::{Error, TaskFilter, TaskStatus, TaskStore};
use tempfile::tempdir;

fn valid(title: &str, status: TaskStatus) -> CreateTask {
    CreateTask::new(title, None, status).expect("valid input")
}

#[test]
fn missing_snapshot_starts_empty_with_filter_all() {
    let dir = tempdir().expect("tempdir");
    let store = TaskStore::open_file(dir.path().join("tasks.json")).expect("open");
    assert!(store.tasks().is_empty());
    assert_eq!(store.filter(), TaskFilter::All);
}

#[test]
fn state_survives_reopen() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("tasks.json");

    let first_id = {
        let mut store = TaskStore::open_file(&path).expect("open");
        store.create(valid("persisted", TaskStatus::InProgress)).expect("create");
        store.set_filter(TaskFilter::InProgress).expect("set filter");
        store.create(valid("second", TaskStatus::Todo)).expect("create");
        store.tasks()[1].id.clone()
    };

    let store = TaskStore::open_file(&path).expect("reopen");
    assert_eq!(store.tasks().len(), 2);
    assert_eq!(store.filter(), TaskFilter::InProgress);
    let task = store.task_by_id(&first_id).expect("still present");
    assert_eq!(task.title, "persisted");
    assert_eq!(task.status, TaskStatus::InProgress);
}

#[test]
fn filter_change_alone_survives_reopen() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("tasks.json");

    {
        let mut store = TaskStore::open_file(&path).expect("open");
        store.create(valid("t", TaskStatus::Todo)).expect("create");
        store.set_filter(TaskFilter::Done).expect("set filter");
        // No task mutation after the filter change.
    }

    let reopened = TaskStore::open_file(&path).expect("reopen");
    assert_eq!(reopened.filter(), TaskFilter::Done);
    assert_eq!(reopened.tasks().len(), 1);
}

#[test]
fn snapshot_is_iso_8601_and_versioned() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("tasks.json");

    let mut store = TaskStore::open_file(&path).expect("open");
    store.create(valid("walk", TaskStatus::Todo)).expect("create");

    let raw = std::fs::read_to_string(&path).expect("snapshot file");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(json["version"], STATE_SCHEMA_VERSION);
    assert_eq!(json["filter"], "all");
    assert_eq!(json["tasks"][0]["status"], "todo");
    let created_at = json["tasks"][0]["createdAt"].as_str().expect("createdAt");
    assert!(created_at.contains('T'), "expected ISO-8601, got {created_at}");
}

#[test]
fn error_slot_is_not_persisted() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("tasks.json");

    let mut store = TaskStore::open_file(&path).expect("open");
    store.create(valid("t", TaskStatus::Todo)).expect("create");
    assert!(!store.delete("missing").expect("delete"));
    assert!(store.last_error().is_some());

    let reopened = TaskStore::open_file(&path).expect("reopen");
    assert_eq!(reopened.last_error(), None);
}

#[test]
fn save_failure_propagates_and_store_stays_usable() {
    let mut inner = MemoryStore::new();
    inner.fail_saves(true);
    let mut store = TaskStore::open(SequenceIdSource::default(), inner).expect("open");

    let err = store
        .create(valid("t", TaskStatus::Todo))
        .expect_err("save should fail");
    assert!(matches!(err, Error::Io(_)));
    assert!(store.last_error().is_some());

    // Reads still work after a failed save.
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.task_counts().all, 1);
}

#[test]
fn file_store_save_replaces_previous_snapshot() {
    let dir = tempdir().expect("tempdir");
    let mut file_store = JsonFileStore::new(dir.path().join("state.json"));

    file_store.save(&PersistedState::default()).expect("save empty");
    let state = PersistedState::new(Vec::new(), TaskFilter::Done);
    file_store.save(&state).expect("save again");

    let loaded = file_store.load().expect("load").expect("present");
    assert_eq!(loaded.filter, TaskFilter::Done);
}

#[test]
fn corrupt_snapshot_fails_open() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("tasks.json");
    std::fs::write(
        &path,
        r#"{"version":"taskdeck.state.v1","tasks":[{"id":"a1","title":"","status":"todo","createdAt":"2026-01-01T00:00:00Z"}],"filter":"all"}"#,
    )
    .expect("write snapshot");

    let result = TaskStore::open_file(&path);
    assert!(matches!(result, Err(Error::CorruptSnapshot(_))));
}

#[test]
fn unparseable_snapshot_fails_open_with_json_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("tasks.json");
    std::fs::write(&path, "not json").expect("write snapshot");

    let result = TaskStore::open_file(&path);
    assert!(matches!(result, Err(Error::Json(_))));
}
