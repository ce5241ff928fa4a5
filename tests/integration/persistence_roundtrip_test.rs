//! Integration tests for saving and restoring user data through SQLite.

use chrono::NaiveDate;
use fittrack::calories::{ActivityLevel, CalorieWizard, Gender, WeightGoal};
use fittrack::goals::GoalManager;
use fittrack::storage::{wait_all, Persister, SqliteStore};
use fittrack::workouts::{WorkoutDraft, WorkoutLog};
use std::path::Path;

fn open(path: &Path) -> Persister {
    Persister::spawn(SqliteStore::open(path).unwrap()).unwrap()
}

#[test]
fn test_workouts_and_goals_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fittrack.db");

    let (saved_workouts, saved_goals) = {
        let persister = open(&path);
        let mut log = WorkoutLog::new(persister.clone());
        let mut goals = GoalManager::new(persister.clone());
        let mut draft = WorkoutDraft::new();
        let mut pending = Vec::new();

        draft.set_name("Bench press");
        draft.set_requires_weights(true);
        assert!(draft.set_weight("135.5"));
        assert!(draft.set_reps("8"));
        assert!(draft.set_sets("3"));
        pending.push(
            log.add_workout_on(&mut draft, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
                .unwrap(),
        );

        draft.set_name("Plank");
        assert!(draft.set_sets("2"));
        pending.push(
            log.add_workout_on(&mut draft, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap())
                .unwrap(),
        );

        pending.extend(goals.add_goal("Bench 185").unwrap());
        pending.extend(goals.add_goal("Run a 10k").unwrap());
        let (_, removed) = goals.remove_goal(1).unwrap();
        pending.extend(removed);

        assert!(wait_all(pending).is_empty());
        (log.records().to_vec(), goals.goals().to_vec())
    };

    let persister = open(&path);
    let log = WorkoutLog::load(persister.clone());
    let goals = GoalManager::load(persister);

    assert_eq!(log.records(), saved_workouts.as_slice());
    assert_eq!(log.records()[0].weight.as_deref(), Some("135.5"));
    assert_eq!(log.records()[1].weight, None);
    assert_eq!(goals.goals(), saved_goals.as_slice());
    // Removed ids are not handed out again
    assert_eq!(goals.next_id(), Some(3));
}

#[test]
fn test_wizard_answers_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fittrack.db");

    {
        let mut wizard = CalorieWizard::new(open(&path));
        wizard.select_gender(Gender::Female);
        assert!(wait_all(wizard.advance().unwrap()).is_empty());
        wizard.set_age("35");
        assert!(wait_all(wizard.advance().unwrap()).is_empty());
        wizard.set_height_feet("5");
        wizard.set_height_inches("6");
        assert!(wait_all(wizard.advance().unwrap()).is_empty());
        wizard.set_weight("150");
        assert!(wait_all(wizard.advance().unwrap()).is_empty());
        wizard.select_activity_level(ActivityLevel::Sedentary);
        assert!(wait_all(wizard.advance().unwrap()).is_empty());
        wizard.select_weight_goal(WeightGoal::SlowlyLose);
        assert!(wait_all(wizard.advance().unwrap()).is_empty());
        assert!(wait_all(wizard.advance().unwrap()).is_empty());
    }

    let restored = CalorieWizard::load(open(&path));
    let expected = restored.daily_goal();

    assert!(expected.is_some());
    assert_eq!(restored.saved_daily_goal(), expected);
    assert_eq!(restored.answers().height_inches, "6");
    assert!(restored.intake().is_none());
}

#[test]
fn test_legacy_records_without_id_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fittrack.db");

    {
        let persister = open(&path);
        let legacy = r#"[{"workoutName":"Squat","requiresWeights":true,"weight":"225","reps":"5","sets":"5","date":"Mon, Oct 19"}]"#;
        persister.set("workouts", legacy).wait().unwrap();
    }

    let log = WorkoutLog::load(open(&path));
    assert_eq!(log.len(), 1);
    assert_eq!(log.records()[0].name, "Squat");
    assert!(!log.records()[0].id.is_nil());
}
