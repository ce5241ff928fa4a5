//! Integration tests for storage failures.
//!
//! Failed or slow writes are reported through their receipts while the
//! in-memory state keeps the change.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use fittrack::goals::GoalManager;
use fittrack::storage::{
    wait_all, KeyValueStore, MemoryStore, PersistenceError, Persister, StorageError,
};
use fittrack::workouts::{WorkoutDraft, WorkoutLog, WorkoutRecord};

/// Store that rejects every write.
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Rejected(format!("read-only store: {}", key)))
    }
}

/// Store whose writes stall.
struct StallingStore {
    inner: MemoryStore,
    stall: Duration,
}

impl KeyValueStore for StallingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::thread::sleep(self.stall);
        self.inner.set(key, value)
    }
}

/// Store whose reads fail.
struct UnreadableStore;

impl KeyValueStore for UnreadableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Io("disk unavailable".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Store whose first reads fail, as when another connection holds the lock.
struct BusyAtStartStore {
    inner: MemoryStore,
    failures_left: AtomicUsize,
}

impl BusyAtStartStore {
    fn new(inner: MemoryStore, failures: usize) -> Self {
        Self {
            inner,
            failures_left: AtomicUsize::new(failures),
        }
    }
}

impl KeyValueStore for BusyAtStartStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let busy = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if busy {
            return Err(StorageError::Io("database is locked".to_string()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value)
    }
}

fn seed_workouts(store: &MemoryStore, names: &[&str]) {
    let mut log = WorkoutLog::new(Persister::spawn(store.clone()).unwrap());
    let mut draft = WorkoutDraft::new();
    for name in names {
        draft.set_name(*name);
        log.add_workout(&mut draft).unwrap().wait().unwrap();
    }
}

fn stored_workout_names(store: &MemoryStore) -> Vec<String> {
    let raw = store.get("workouts").unwrap().unwrap_or_default();
    let records: Vec<WorkoutRecord> = serde_json::from_str(&raw).unwrap();
    records.into_iter().map(|r| r.name).collect()
}

#[test]
fn test_rejected_write_keeps_memory_state() {
    let mut log = WorkoutLog::new(Persister::spawn(ReadOnlyStore).unwrap());
    let mut draft = WorkoutDraft::new();
    draft.set_name("Pull-ups");

    let pending = log.add_workout(&mut draft).unwrap();
    let result = pending.wait();

    match result {
        Err(PersistenceError::Storage { key, source }) => {
            assert_eq!(key, "workouts");
            assert!(matches!(source, StorageError::Rejected(_)));
        }
        other => panic!("expected storage error, got {:?}", other),
    }
    assert_eq!(log.len(), 1);
    assert_eq!(log.records()[0].name, "Pull-ups");
}

#[test]
fn test_goal_writes_report_both_keys() {
    let mut goals = GoalManager::new(Persister::spawn(ReadOnlyStore).unwrap());

    let errors = wait_all(goals.add_goal("Touch toes").unwrap());
    let keys: Vec<&str> = errors.iter().map(|e| e.key()).collect();

    assert_eq!(keys, vec!["goals", "goalsNextId"]);
    assert_eq!(goals.len(), 1);
}

#[test]
fn test_slow_write_times_out() {
    let store = StallingStore {
        inner: MemoryStore::new(),
        stall: Duration::from_millis(300),
    };
    let persister = Persister::with_timeout(store, Duration::from_millis(20)).unwrap();

    let result = persister.set("ageValue", "30").wait();
    assert!(matches!(result, Err(PersistenceError::Timeout { .. })));
}

#[test]
fn test_unreadable_store_starts_empty() {
    let persister = Persister::spawn(UnreadableStore).unwrap();

    let mut log = WorkoutLog::new(persister.clone());
    assert!(log.hydrate().is_err());
    assert!(log.is_empty());

    let goals = GoalManager::load(persister);
    assert!(goals.is_empty());
    assert_eq!(goals.next_id(), Some(1));
    assert!(!goals.is_restored());
}

#[test]
fn test_failed_startup_read_retries_before_saving_workouts() {
    let store = MemoryStore::new();
    seed_workouts(&store, &["Squat", "Bench"]);

    let persister = Persister::spawn(BusyAtStartStore::new(store.clone(), 1)).unwrap();
    let mut log = WorkoutLog::load(persister);
    assert!(log.is_empty());
    assert!(!log.is_restored());

    let mut draft = WorkoutDraft::new();
    draft.set_name("Row");
    log.add_workout(&mut draft).unwrap().wait().unwrap();

    assert!(log.is_restored());
    assert_eq!(stored_workout_names(&store), vec!["Squat", "Bench", "Row"]);
    assert_eq!(log.len(), 3);
}

#[test]
fn test_unreadable_workouts_are_never_overwritten() {
    let store = MemoryStore::new();
    seed_workouts(&store, &["Squat", "Bench"]);

    let persister = Persister::spawn(BusyAtStartStore::new(store.clone(), usize::MAX)).unwrap();
    let mut log = WorkoutLog::load(persister.clone());

    let mut draft = WorkoutDraft::new();
    draft.set_name("Row");
    let err = log.add_workout(&mut draft).unwrap().wait().unwrap_err();

    assert!(matches!(err, PersistenceError::Unrestored { ref key } if key == "workouts"));
    assert_eq!(log.len(), 1);
    persister.flush().unwrap();
    assert_eq!(stored_workout_names(&store), vec!["Squat", "Bench"]);
}

#[test]
fn test_malformed_workouts_are_backed_up() {
    let raw = r#"[{"workoutName":"Squat","requiresWeights":false,"reps":"5","sets":"5","date":"Mon, Oct 19"},{"workoutName":7}]"#;
    let store = MemoryStore::with_entries([("workouts", raw)]);
    let mut log = WorkoutLog::load(Persister::spawn(store.clone()).unwrap());
    assert!(log.is_empty());

    let mut draft = WorkoutDraft::new();
    draft.set_name("Row");
    log.add_workout(&mut draft).unwrap().wait().unwrap();

    assert_eq!(store.get("workouts.unreadable").unwrap().as_deref(), Some(raw));
    assert_eq!(stored_workout_names(&store), vec!["Row"]);
}

#[test]
fn test_failed_startup_read_retries_before_saving_goals() {
    let store = MemoryStore::new();
    {
        let mut goals = GoalManager::new(Persister::spawn(store.clone()).unwrap());
        assert!(wait_all(goals.add_goal("Run a 5k").unwrap()).is_empty());
        assert!(wait_all(goals.add_goal("Bench 200").unwrap()).is_empty());
    }

    let persister = Persister::spawn(BusyAtStartStore::new(store.clone(), 1)).unwrap();
    let mut goals = GoalManager::load(persister);
    assert!(goals.is_empty());

    assert!(wait_all(goals.add_goal("Stretch daily").unwrap()).is_empty());

    let ids: Vec<u64> = goals.goals().iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(goals.goals()[2].text, "Stretch daily");
    assert_eq!(store.get("goalsNextId").unwrap().as_deref(), Some("4"));
    assert!(store.get("goals").unwrap().unwrap().contains("Run a 5k"));
}
