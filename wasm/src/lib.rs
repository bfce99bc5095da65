//! Smart Vitals WASM Module
//!
//! Browser bindings for the energy calculators, so the frontend can preview
//! targets and workout estimates with exactly the server's numbers.

use serde::Deserialize;
use smart_vitals_shared::{
    compute_target, ActivityLevel, BodyProfile, GoalKind, GoalSpec, MetTable, Sex,
};
use wasm_bindgen::prelude::*;

fn profile(sex: &str, mass_kg: f64, height_cm: f64, age_years: i32, activity: &str) -> BodyProfile {
    BodyProfile {
        sex: Sex::from(sex.to_string()),
        mass_kg,
        height_cm,
        age_years,
        activity_level: ActivityLevel::parse_lenient(activity),
    }
}

/// Basal metabolic rate (Mifflin-St Jeor), kcal/day
#[wasm_bindgen]
pub fn compute_bmr(sex: &str, mass_kg: f64, height_cm: f64, age_years: i32) -> f64 {
    smart_vitals_shared::compute_bmr(&profile(sex, mass_kg, height_cm, age_years, "sedentary"))
}

/// Total daily energy expenditure; unknown activity levels count as sedentary
#[wasm_bindgen]
pub fn compute_tdee(
    sex: &str,
    mass_kg: f64,
    height_cm: f64,
    age_years: i32,
    activity_level: &str,
) -> f64 {
    smart_vitals_shared::compute_tdee(&profile(sex, mass_kg, height_cm, age_years, activity_level))
}

/// Daily calorie target and macro grams
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTarget {
    pub daily_calories: i32,
    pub protein_g: i32,
    pub carbs_g: i32,
    pub fat_g: i32,
}

#[wasm_bindgen]
pub fn compute_daily_target(
    sex: &str,
    mass_kg: f64,
    height_cm: f64,
    age_years: i32,
    activity_level: &str,
    goal_kind: &str,
) -> DailyTarget {
    let goal = GoalSpec {
        kind: GoalKind::from(goal_kind.to_string()),
        target_mass_kg: None,
    };
    let target = compute_target(
        &profile(sex, mass_kg, height_cm, age_years, activity_level),
        &goal,
    );

    DailyTarget {
        daily_calories: target.daily_calories,
        protein_g: target.protein_g,
        carbs_g: target.carbs_g,
        fat_g: target.fat_g,
    }
}

#[derive(Deserialize)]
struct TargetInput {
    profile: BodyProfile,
    #[serde(default)]
    goal: GoalSpec,
}

fn daily_target_from_json(input: &str) -> Result<String, String> {
    let input: TargetInput = serde_json::from_str(input).map_err(|e| e.to_string())?;
    let target = compute_target(&input.profile, &input.goal);
    serde_json::to_string(&target).map_err(|e| e.to_string())
}

/// Same as `compute_daily_target`, taking and returning the API's JSON shapes
#[wasm_bindgen]
pub fn compute_daily_target_json(input: &str) -> Result<String, JsValue> {
    daily_target_from_json(input).map_err(|e| JsValue::from_str(&e))
}

/// Estimated calories for a workout, classified by name with the default MET table
#[wasm_bindgen]
pub fn estimate_workout_calories(
    exercise_name: &str,
    met_category: Option<String>,
    mass_kg: f64,
    duration_minutes: f64,
) -> f64 {
    MetTable::default().estimate(
        exercise_name,
        met_category.as_deref(),
        mass_kg,
        duration_minutes,
    ) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmr_matches_server() {
        assert_eq!(compute_bmr("male", 90.0, 180.0, 30), 1880.0);
        assert_eq!(compute_bmr("female", 90.0, 180.0, 30), 1714.0);
    }

    #[test]
    fn test_unknown_activity_is_sedentary() {
        let tdee = compute_tdee("male", 90.0, 180.0, 30, "couch");
        assert!((tdee - 1880.0 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_daily_target_example() {
        let target = compute_daily_target("male", 90.0, 180.0, 30, "moderately_active", "lose_weight");
        assert_eq!(
            target,
            DailyTarget {
                daily_calories: 2414,
                protein_g: 151,
                carbs_g: 272,
                fat_g: 80,
            }
        );
    }

    #[test]
    fn test_daily_target_json() {
        let json = r#"{"profile":{"sex":"female","mass_kg":45,"height_cm":150,"age_years":70},"goal":{"kind":"lose_weight"}}"#;
        let output = daily_target_from_json(json).unwrap();
        assert!(output.contains("\"daily_calories\":1200"));
        assert!(daily_target_from_json("{}").is_err());
    }

    #[test]
    fn test_estimate_workout_calories() {
        assert_eq!(estimate_workout_calories("Evening Walk", None, 70.0, 60.0), 245.0);
        assert_eq!(
            estimate_workout_calories("Deadlifts", Some("Strength".to_string()), 80.0, 45.0),
            300.0
        );
    }
}
