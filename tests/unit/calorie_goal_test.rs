//! Unit tests for the daily calorie goal.

use fittrack::calories::{
    breakdown, compute_daily_goal, ActivityLevel, Gender, UserProfile, WeightGoal,
};
use proptest::prelude::*;

fn profile(gender: Gender, activity_level: ActivityLevel, weight_goal: WeightGoal) -> UserProfile {
    UserProfile {
        gender,
        age_years: 30,
        height_feet: 5,
        height_inches: 10,
        weight_pounds: 180.0,
        activity_level,
        weight_goal,
    }
}

#[test]
fn test_reference_profile() {
    // 177.8 cm, 81.63 kg, 30 years: BMR 1784.16, x1.55 = 2765.45
    let p = profile(Gender::Male, ActivityLevel::ModeratelyActive, WeightGoal::Maintain);
    let result = breakdown(&p);

    assert!((result.bmr - 1784.16).abs() < 0.01);
    assert_eq!(result.rounded_goal(), 2765);
}

#[test]
fn test_every_activity_multiplier() {
    let base = breakdown(&profile(Gender::Male, ActivityLevel::Sedentary, WeightGoal::Maintain)).bmr;
    let expected = [1.2, 1.375, 1.55, 1.725, 1.9];

    for (level, multiplier) in ActivityLevel::ALL.into_iter().zip(expected) {
        let goal = compute_daily_goal(&profile(Gender::Male, level, WeightGoal::Maintain));
        assert!((goal - base * multiplier).abs() < 1e-9, "{:?}", level);
    }
}

#[test]
fn test_every_weight_goal_adjustment() {
    let tdee = compute_daily_goal(&profile(
        Gender::Female,
        ActivityLevel::LightlyActive,
        WeightGoal::Maintain,
    ));
    let expected = [0.8, 0.9, 1.0, 1.1, 1.2];

    for (goal, factor) in WeightGoal::ALL.into_iter().zip(expected) {
        let value = compute_daily_goal(&profile(Gender::Female, ActivityLevel::LightlyActive, goal));
        assert!((value - tdee * factor).abs() < 1e-9, "{:?}", goal);
    }
}

fn any_activity() -> impl Strategy<Value = ActivityLevel> {
    (0usize..5).prop_map(|i| ActivityLevel::ALL[i])
}

fn any_weight_goal() -> impl Strategy<Value = WeightGoal> {
    (0usize..5).prop_map(|i| WeightGoal::ALL[i])
}

proptest! {
    #[test]
    fn prop_heavier_means_higher_goal(
        age in 1u32..100,
        feet in 4u32..7,
        inches in 0u32..12,
        weight in 80.0f64..400.0,
        extra in 1.0f64..50.0,
        activity in any_activity(),
        goal in any_weight_goal(),
    ) {
        let lighter = UserProfile {
            gender: Gender::Male,
            age_years: age,
            height_feet: feet,
            height_inches: inches,
            weight_pounds: weight,
            activity_level: activity,
            weight_goal: goal,
        };
        let heavier = UserProfile { weight_pounds: weight + extra, ..lighter };

        prop_assert!(compute_daily_goal(&heavier) > compute_daily_goal(&lighter));
    }

    #[test]
    fn prop_gender_gap_is_scaled_offset(
        age in 1u32..100,
        weight in 80.0f64..400.0,
        activity in any_activity(),
        goal in any_weight_goal(),
    ) {
        let male = UserProfile {
            gender: Gender::Male,
            age_years: age,
            height_feet: 5,
            height_inches: 6,
            weight_pounds: weight,
            activity_level: activity,
            weight_goal: goal,
        };
        let female = UserProfile { gender: Gender::Female, ..male };

        let gap = compute_daily_goal(&male) - compute_daily_goal(&female);
        let expected = 166.0 * activity.multiplier() * (1.0 + goal.adjustment());
        prop_assert!((gap - expected).abs() < 1e-6);
    }
}
