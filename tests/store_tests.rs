//! Integration tests for RoutineStore over real storage backends
//!
//! These tests verify:
//! - Edits survive a restart (file-backed storage)
//! - Corrupt stored data falls back to the built-in routines
//! - Reset wins over any previous edits

use routine_editor::{
    default_routines, FileStorage, KeyValueStore, MemoryStorage, RepTarget, Reps, RoutineStore,
    StoreError, STORAGE_KEY,
};
use tempfile::TempDir;

fn reopen(dir: &TempDir) -> RoutineStore<FileStorage> {
    RoutineStore::open(FileStorage::open(dir.path()).unwrap())
}

// =============================================================================
// Persistence Across Restarts
// =============================================================================

#[test]
fn test_added_exercise_survives_reload() {
    let dir = TempDir::new().unwrap();
    let mut store = reopen(&dir);
    store.add_exercise("rings", "Burpees", "3", "10,10,5").unwrap();
    drop(store);

    let store = reopen(&dir);
    let last = store.routine("rings").unwrap().exercises.last().unwrap();
    assert_eq!(last.name, "Burpees");
    assert_eq!(last.sets, 3);
    assert_eq!(
        last.reps,
        Reps::PerSet(vec![RepTarget::Count(10), RepTarget::Count(10), RepTarget::Count(5)])
    );
}

#[test]
fn test_every_edit_is_written_immediately() {
    let dir = TempDir::new().unwrap();
    let mut store = reopen(&dir);

    store.set_sets("park", 0, "2").unwrap();
    assert_eq!(reopen(&dir).routine("park").unwrap().exercises[0].sets, 2);

    store.set_reps("park", 5, "15 min").unwrap();
    assert_eq!(
        reopen(&dir).routine("park").unwrap().exercises[5].reps,
        Reps::Text("15 min".into())
    );

    store.delete_exercise("park", 0).unwrap();
    assert_eq!(reopen(&dir).routine("park").unwrap().exercises.len(), 5);
}

#[test]
fn test_exercise_ids_are_stable_across_reload() {
    let dir = TempDir::new().unwrap();
    let mut store = reopen(&dir);
    let before: Vec<_> = store.routines()[0].exercises.iter().map(|e| e.id).collect();
    store.set_sets("rings", 0, "3").unwrap();

    let after: Vec<_> = reopen(&dir).routines()[0].exercises.iter().map(|e| e.id).collect();
    assert_eq!(before, after);
}

#[test]
fn test_stored_json_uses_expected_field_names() {
    let dir = TempDir::new().unwrap();
    let mut store = reopen(&dir);
    store.reset().unwrap();

    let raw = store.storage().get(STORAGE_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let rings = &json[0];
    assert_eq!(rings["id"], "rings");
    assert_eq!(rings["colorClass"], "routine-rings");
    assert_eq!(rings["exercises"][0]["reps"], "30s");
    assert_eq!(json[1]["exercises"][1]["reps"], serde_json::json!([3, 3, 3, 1]));
}

// =============================================================================
// Recovery
// =============================================================================

#[test]
fn test_corrupt_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("routinesData.json"), "{ truncated").unwrap();

    let store = reopen(&dir);
    assert_eq!(store.routines().len(), default_routines().len());
    assert_eq!(store.routines()[0].name, "Rings Workout");
}

#[test]
fn test_legacy_data_without_exercise_ids_loads() {
    let raw = r#"[{"id":"gym","name":"Gym","colorClass":"routine-gym","exercises":[
        {"name":"Deadlift","sets":5,"reps":5},
        {"name":"Carry","sets":3,"reps":"40m"}
    ]}]"#;
    let mut store = RoutineStore::open(MemoryStorage::with_value(STORAGE_KEY, raw));
    assert_eq!(store.routines().len(), 1);
    assert!(store.routine("gym").unwrap().info.is_none());

    let carry = store.routine("gym").unwrap().exercises[1].id;
    store.set_sets("gym", carry, "4").unwrap();
    assert_eq!(store.load()[0].exercises[1].sets, 4);
}

#[test]
fn test_numbers_written_by_older_versions_keep_the_routine() {
    let raw = r#"[{"id":"gym","name":"Gym","colorClass":"routine-gym","exercises":[
        {"name":"Hangs","sets":1,"reps":[2.5,3]},
        {"name":"Negatives","sets":2,"reps":-1}
    ]}]"#;
    let store = RoutineStore::open(MemoryStorage::with_value(STORAGE_KEY, raw));
    let ids: Vec<_> = store.choices().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["gym"]);

    let gym = store.routine("gym").unwrap();
    assert_eq!(
        gym.exercises[0].reps,
        Reps::PerSet(vec![RepTarget::Text("2.5".into()), RepTarget::Count(3)])
    );
    assert_eq!(gym.exercises[1].reps, Reps::Text("-1".into()));
}

// =============================================================================
// Reset and Save
// =============================================================================

#[test]
fn test_reset_then_load_returns_defaults() {
    let mut store = RoutineStore::open(MemoryStorage::new());
    store.delete_exercise("home", 0).unwrap();
    store.add_exercise("park", "Sprints", "6", "20s").unwrap();
    store.reset().unwrap();

    let loaded = store.load();
    let expected = default_routines();
    assert_eq!(loaded.len(), expected.len());
    for (got, want) in loaded.iter().zip(&expected) {
        assert_eq!(got.id, want.id);
        assert_eq!(got.name, want.name);
        let got: Vec<_> = got.exercises.iter().map(|e| (&e.name, e.sets, &e.reps)).collect();
        let want: Vec<_> = want.exercises.iter().map(|e| (&e.name, e.sets, &e.reps)).collect();
        assert_eq!(got, want);
    }
}

#[test]
fn test_duplicate_save_does_not_touch_storage() {
    let mut store = RoutineStore::open(MemoryStorage::new());
    let mut routines = default_routines();
    routines.push(routines[0].clone());
    assert!(matches!(store.save(routines), Err(StoreError::DuplicateRoutine(_))));
    assert_eq!(store.storage().get(STORAGE_KEY).unwrap(), None);
}
