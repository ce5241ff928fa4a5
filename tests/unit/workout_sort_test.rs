//! Unit tests for workout list ordering.

use chrono::NaiveDate;
use fittrack::storage::{KeyValueStore, MemoryStore, Persister};
use fittrack::workouts::{SortOrder, WorkoutDraft, WorkoutLog};
use proptest::prelude::*;

fn log_with(entries: &[(&str, NaiveDate)]) -> WorkoutLog {
    let mut log = WorkoutLog::new(Persister::spawn(MemoryStore::new()).unwrap());
    let mut draft = WorkoutDraft::new();
    for (name, date) in entries {
        draft.set_name(*name);
        let _ = log.add_workout_on(&mut draft, *date).unwrap();
    }
    log
}

fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).unwrap()
}

#[test]
fn test_date_order_newest_first() {
    let log = log_with(&[
        ("Squat", day(3, 2)),
        ("Row", day(11, 20)),
        ("Bench", day(7, 14)),
    ]);

    let names: Vec<&str> = log.view().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Row", "Bench", "Squat"]);
}

#[test]
fn test_name_order_ignores_case() {
    let mut log = log_with(&[
        ("squat", day(1, 1)),
        ("Bench", day(1, 2)),
        ("curl", day(1, 3)),
    ]);
    log.set_sort_order(SortOrder::Name);

    let names: Vec<&str> = log.view().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Bench", "curl", "squat"]);
}

#[test]
fn test_name_order_places_accented_names_with_their_letter() {
    let mut log = log_with(&[
        ("Zumba", day(1, 1)),
        ("Élan", day(1, 2)),
        ("elliptical", day(1, 3)),
        ("Elan", day(1, 4)),
        ("Ab wheel", day(1, 5)),
    ]);
    log.set_sort_order(SortOrder::Name);

    let names: Vec<&str> = log.view().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Ab wheel", "Elan", "Élan", "elliptical", "Zumba"]);
}

#[test]
fn test_date_order_crosses_new_year() {
    let log = log_with(&[
        ("December", NaiveDate::from_ymd_opt(2026, 12, 30).unwrap()),
        ("January", NaiveDate::from_ymd_opt(2027, 1, 2).unwrap()),
    ]);

    let names: Vec<&str> = log.view().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["January", "December"]);
}

#[test]
fn test_sorting_leaves_stored_order() {
    let mut log = log_with(&[("B", day(1, 1)), ("A", day(2, 1))]);
    log.set_sort_order(SortOrder::Name);
    let _ = log.view();

    let stored: Vec<&str> = log.records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(stored, vec!["B", "A"]);
}

#[test]
fn test_remove_uses_display_position() {
    let mut log = log_with(&[("Squat", day(1, 1)), ("Row", day(5, 1))]);

    // Newest first: "Row" is shown at position 0
    let (removed, _) = log.remove_workout(0).unwrap();
    assert_eq!(removed.name, "Row");
    assert_eq!(log.len(), 1);
    assert!(log.remove_workout(5).is_err());
}

#[test]
fn test_remove_under_name_sort_updates_stored_list() {
    let store = MemoryStore::new();
    let mut log = WorkoutLog::new(Persister::spawn(store.clone()).unwrap());
    let mut draft = WorkoutDraft::new();
    for (name, date) in [("Squat", day(1, 3)), ("Bench", day(1, 1)), ("Row", day(1, 2))] {
        draft.set_name(name);
        let _ = log.add_workout_on(&mut draft, date).unwrap();
    }
    log.set_sort_order(SortOrder::Name);

    // Name order is Bench, Row, Squat
    let (removed, pending) = log.remove_workout(1).unwrap();
    pending.wait().unwrap();
    assert_eq!(removed.name, "Row");

    let stored = store.get("workouts").unwrap().unwrap();
    assert!(!stored.contains("\"Row\""));
    let stored_names: Vec<&str> = log.records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(stored_names, vec!["Squat", "Bench"]);
}

fn entries() -> impl Strategy<Value = Vec<(usize, u32, u32)>> {
    prop::collection::vec((0usize..5, 1u32..=12, 1u32..=28), 0..24)
}

const NAMES: [&str; 5] = ["Deadlift", "bench", "Bench", "Press", "Élévation"];

proptest! {
    #[test]
    fn prop_date_sort_is_stable(raw in entries()) {
        let items: Vec<(&str, NaiveDate)> =
            raw.iter().map(|(n, m, d)| (NAMES[*n], day(*m, *d))).collect();
        let log = log_with(&items);

        let view = log.view();
        prop_assert_eq!(view.len(), items.len());

        for pair in view.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.date_key() >= b.date_key());
            if a.date_key() == b.date_key() {
                let pos = |id| log.records().iter().position(|r| r.id == id);
                prop_assert!(pos(a.id) < pos(b.id));
            }
        }
    }

    #[test]
    fn prop_name_sort_is_stable(raw in entries()) {
        let items: Vec<(&str, NaiveDate)> =
            raw.iter().map(|(n, m, d)| (NAMES[*n], day(*m, *d))).collect();
        let mut log = log_with(&items);
        log.set_sort_order(SortOrder::Name);

        let view = log.view();
        for pair in view.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (ka, kb) = (a.name_key(), b.name_key());
            prop_assert!(ka <= kb);
            if ka == kb {
                let pos = |id| log.records().iter().position(|r| r.id == id);
                prop_assert!(pos(a.id) < pos(b.id));
            }
        }
    }
}
