//! Unit tests for the calorie wizard flow.

use fittrack::calories::{ActivityLevel, CalorieWizard, Gender, WeightGoal, WizardStep};
use fittrack::storage::kv::keys;
use fittrack::storage::{wait_all, KeyValueStore, MemoryStore, Persister};
use fittrack::ValidationError;

fn wizard_with(store: &MemoryStore) -> CalorieWizard {
    CalorieWizard::new(Persister::spawn(store.clone()).unwrap())
}

fn confirm(wizard: &mut CalorieWizard) {
    let errors = wait_all(wizard.advance().unwrap());
    assert!(errors.is_empty(), "{:?}", errors);
}

#[test]
fn test_full_run_persists_each_answer() {
    let store = MemoryStore::new();
    let mut wizard = wizard_with(&store);

    wizard.select_gender(Gender::Male);
    confirm(&mut wizard);
    wizard.set_age("30");
    confirm(&mut wizard);
    wizard.set_height_feet("5");
    wizard.set_height_inches("10");
    confirm(&mut wizard);
    wizard.set_weight("180");
    confirm(&mut wizard);
    wizard.select_activity_level(ActivityLevel::ModeratelyActive);
    confirm(&mut wizard);
    wizard.select_weight_goal(WeightGoal::Maintain);
    confirm(&mut wizard);

    assert_eq!(wizard.step(), WizardStep::Result);
    assert_eq!(wizard.daily_goal(), Some(2765));

    confirm(&mut wizard);
    assert_eq!(wizard.step(), WizardStep::Tracking);
    assert_eq!(wizard.intake().map(|i| i.daily_goal()), Some(2765));

    let stored = |key: &str| store.get(key).unwrap();
    assert_eq!(stored(keys::GENDER).as_deref(), Some("0"));
    assert_eq!(stored(keys::AGE).as_deref(), Some("30"));
    assert_eq!(stored(keys::HEIGHT_FEET).as_deref(), Some("5"));
    assert_eq!(stored(keys::HEIGHT_INCHES).as_deref(), Some("10"));
    assert_eq!(stored(keys::WEIGHT_POUNDS).as_deref(), Some("180"));
    assert_eq!(stored(keys::ACTIVITY_LEVEL).as_deref(), Some("2"));
    assert_eq!(stored(keys::WEIGHT_GOAL).as_deref(), Some("2"));
    assert_eq!(stored(keys::DAILY_GOAL).as_deref(), Some("2765"));
}

#[test]
fn test_invalid_answer_keeps_step_and_shows_error() {
    let store = MemoryStore::new();
    let mut wizard = wizard_with(&store);
    wizard.select_gender(Gender::Female);
    confirm(&mut wizard);

    wizard.set_age("abc");
    let result = wizard.advance();

    assert!(matches!(result, Err(ValidationError::InvalidAge(_))));
    assert_eq!(wizard.step(), WizardStep::Age);
    assert!(wizard.error_visible());
    assert_eq!(wizard.answers().age, "abc");
    assert!(store.get(keys::AGE).unwrap().is_none());

    wizard.set_age("41");
    assert!(!wizard.error_visible());
    confirm(&mut wizard);
    assert_eq!(wizard.step(), WizardStep::Height);
}

#[test]
fn test_empty_age_is_rejected() {
    let mut wizard = wizard_with(&MemoryStore::new());
    wizard.select_gender(Gender::Male);
    confirm(&mut wizard);

    assert!(wizard.advance().is_err());
    assert_eq!(wizard.step().index(), 1);
    assert!(wizard.error_visible());
}

#[test]
fn test_missing_selection_is_rejected() {
    let mut wizard = wizard_with(&MemoryStore::new());
    assert!(matches!(wizard.advance(), Err(ValidationError::MissingGender)));
    assert_eq!(wizard.step(), WizardStep::Gender);
}

#[test]
fn test_inches_out_of_range() {
    let mut wizard = wizard_with(&MemoryStore::new());
    wizard.select_gender(Gender::Male);
    confirm(&mut wizard);
    wizard.set_age("25");
    confirm(&mut wizard);

    wizard.set_height_feet("5");
    wizard.set_height_inches("12");
    assert!(wizard.advance().is_err());
    assert_eq!(wizard.step(), WizardStep::Height);
}

#[test]
fn test_back_keeps_answers() {
    let mut wizard = wizard_with(&MemoryStore::new());
    wizard.select_gender(Gender::Male);
    confirm(&mut wizard);
    wizard.set_age("30");

    assert!(wizard.back());
    assert_eq!(wizard.step(), WizardStep::Gender);
    assert_eq!(wizard.answers().age, "30");
    assert!(!wizard.back());
}

#[test]
fn test_hydrate_prefills_answers() {
    let store = MemoryStore::with_entries([
        (keys::GENDER, "1"),
        (keys::AGE, "28"),
        (keys::HEIGHT_FEET, "5"),
        (keys::HEIGHT_INCHES, "4"),
        (keys::WEIGHT_POUNDS, "130"),
        (keys::LEGACY_ACTIVITY_LEVEL, "3"),
        (keys::WEIGHT_GOAL, "0"),
        (keys::DAILY_GOAL, "1904.6"),
    ]);
    let wizard = CalorieWizard::load(Persister::spawn(store).unwrap());

    let answers = wizard.answers();
    assert_eq!(answers.gender, Some(Gender::Female));
    assert_eq!(answers.age, "28");
    assert_eq!(answers.activity_level, Some(ActivityLevel::VeryActive));
    assert_eq!(answers.weight_goal, Some(WeightGoal::Lose));
    assert_eq!(wizard.saved_daily_goal(), Some(1905));
    assert_eq!(wizard.step(), WizardStep::Gender);
    assert!(wizard.profile().is_ok());
}

#[test]
fn test_hydrate_ignores_out_of_range_selection() {
    let store = MemoryStore::with_entries([(keys::GENDER, "7"), (keys::WEIGHT_GOAL, "x")]);
    let wizard = CalorieWizard::load(Persister::spawn(store).unwrap());

    assert_eq!(wizard.answers().gender, None);
    assert_eq!(wizard.answers().weight_goal, None);
}

#[test]
fn test_tracking_follows_profile_edits() {
    let mut wizard = wizard_with(&MemoryStore::new());
    wizard.select_gender(Gender::Male);
    confirm(&mut wizard);
    wizard.set_age("30");
    confirm(&mut wizard);
    wizard.set_height_feet("5");
    wizard.set_height_inches("10");
    confirm(&mut wizard);
    wizard.set_weight("180");
    confirm(&mut wizard);
    wizard.select_activity_level(ActivityLevel::ModeratelyActive);
    confirm(&mut wizard);
    wizard.select_weight_goal(WeightGoal::Maintain);
    confirm(&mut wizard);
    confirm(&mut wizard);

    assert!(wizard.add_calories("2000"));
    assert!(!wizard.intake().unwrap().goal_reached());

    wizard.select_weight_goal(WeightGoal::Lose);
    let intake = wizard.intake().unwrap();
    assert_eq!(intake.daily_goal(), 2212);
    assert!(!intake.goal_reached());

    assert!(matches!(wizard.advance(), Err(ValidationError::AlreadyTracking)));
    assert!(!wizard.error_visible());

    wizard.restart();
    assert_eq!(wizard.step(), WizardStep::Gender);
    assert!(wizard.intake().is_none());
    assert!(!wizard.add_calories("100"));
}
