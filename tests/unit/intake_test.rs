//! Unit tests for daily intake tracking.

use fittrack::calories::IntakeSession;

#[test]
fn test_accumulates_until_goal() {
    let mut intake = IntakeSession::new(2000);

    assert!(intake.add_calories("650"));
    assert!(intake.add_calories(" 700 "));
    assert_eq!(intake.total_consumed(), 1350);
    assert_eq!(intake.remaining(), 650);
    assert!(!intake.goal_reached());

    assert!(intake.add_calories("650"));
    assert!(intake.goal_reached());
    assert_eq!(intake.remaining(), 0);
}

#[test]
fn test_non_numeric_entries_ignored() {
    let mut intake = IntakeSession::new(1800);

    assert!(!intake.add_calories(""));
    assert!(!intake.add_calories("lots"));
    assert!(!intake.add_calories("12.5"));
    assert_eq!(intake.total_consumed(), 0);
}

#[test]
fn test_goal_reached_latches() {
    let mut intake = IntakeSession::new(1000);
    intake.add_calories("1000");
    assert!(intake.goal_reached());

    intake.set_daily_goal(3000);
    assert!(intake.goal_reached());
    assert_eq!(intake.remaining(), 2000);
}

#[test]
fn test_lower_goal_can_trigger_reached() {
    let mut intake = IntakeSession::new(2500);
    intake.add_calories("2200");
    assert!(!intake.goal_reached());

    intake.set_daily_goal(2000);
    assert!(intake.goal_reached());
}
