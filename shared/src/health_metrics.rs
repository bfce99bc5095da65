//! Basal metabolic rate and total daily energy expenditure
//!
//! Provides the Mifflin-St Jeor BMR equation and the activity multipliers
//! used to turn it into TDEE.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Single-sourced constants**: Multipliers live in one named table
//! 3. **Lenient input**: Unknown sex/activity strings fall back instead of failing

use serde::{Deserialize, Serialize};

// ============================================================================
// Body Profile Types
// ============================================================================

/// Biological sex for physiological calculations
///
/// Anything other than `"male"` deserializes as `Female`, which selects the
/// `-161` Mifflin-St Jeor constant and the lower calorie floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Sex {
    Male,
    Female,
}

impl From<String> for Sex {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("male") {
            Sex::Male
        } else {
            Sex::Female
        }
    }
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", from = "Option<String>")]
pub enum ActivityLevel {
    /// Little or no exercise
    #[default]
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise, physical job
    ExtremelyActive,
}

/// Activity multipliers applied to BMR, in ascending order of activity
pub const ACTIVITY_MULTIPLIERS: [(ActivityLevel, f64); 5] = [
    (ActivityLevel::Sedentary, 1.2),
    (ActivityLevel::LightlyActive, 1.375),
    (ActivityLevel::ModeratelyActive, 1.55),
    (ActivityLevel::VeryActive, 1.725),
    (ActivityLevel::ExtremelyActive, 1.9),
];

impl ActivityLevel {
    /// Parse an activity level, falling back to `Sedentary` for unknown input
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "lightly_active" => ActivityLevel::LightlyActive,
            "moderately_active" => ActivityLevel::ModeratelyActive,
            "very_active" => ActivityLevel::VeryActive,
            "extremely_active" | "extra_active" => ActivityLevel::ExtremelyActive,
            _ => ActivityLevel::Sedentary,
        }
    }

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        ACTIVITY_MULTIPLIERS
            .iter()
            .find(|(level, _)| level == self)
            .map(|(_, multiplier)| *multiplier)
            .unwrap_or(ACTIVITY_MULTIPLIERS[0].1)
    }

    /// Stable snake_case name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtremelyActive => "extremely_active",
        }
    }
}

impl From<Option<String>> for ActivityLevel {
    fn from(value: Option<String>) -> Self {
        value
            .as_deref()
            .map(ActivityLevel::parse_lenient)
            .unwrap_or_default()
    }
}

/// Body data needed for energy calculations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyProfile {
    pub sex: Sex,
    /// Body mass in kilograms
    pub mass_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    pub age_years: i32,
    #[serde(default)]
    pub activity_level: ActivityLevel,
}

// ============================================================================
// BMR and TDEE Calculations
// ============================================================================

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Men: BMR = 10 × mass(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × mass(kg) + 6.25 × height(cm) - 5 × age(y) - 161
///
/// Inputs are not validated here; non-positive values produce a meaningless
/// (possibly negative) result.
pub fn compute_bmr(profile: &BodyProfile) -> f64 {
    let base = 10.0 * profile.mass_kg + 6.25 * profile.height_cm - 5.0 * profile.age_years as f64;
    match profile.sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn compute_tdee(profile: &BodyProfile) -> f64 {
    compute_bmr(profile) * profile.activity_level.multiplier()
}

/// BMR/TDEE pair with the multiplier that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyBreakdown {
    pub bmr: f64,
    pub tdee: f64,
    pub activity_multiplier: f64,
}

/// Calculate BMR and TDEE in one pass
pub fn compute_energy_breakdown(profile: &BodyProfile) -> EnergyBreakdown {
    let bmr = compute_bmr(profile);
    let activity_multiplier = profile.activity_level.multiplier();

    EnergyBreakdown {
        bmr,
        tdee: bmr * activity_multiplier,
        activity_multiplier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn profile(sex: Sex, activity_level: ActivityLevel) -> BodyProfile {
        BodyProfile {
            sex,
            mass_kg: 90.0,
            height_cm: 180.0,
            age_years: 30,
            activity_level,
        }
    }

    #[test]
    fn test_bmr_mifflin_male() {
        // 10*90 + 6.25*180 - 5*30 + 5 = 1880
        let bmr = compute_bmr(&profile(Sex::Male, ActivityLevel::Sedentary));
        assert!((bmr - 1880.0).abs() < 1e-9);
    }

    #[test]
    fn test_bmr_mifflin_female() {
        // 10*90 + 6.25*180 - 5*30 - 161 = 1714
        let bmr = compute_bmr(&profile(Sex::Female, ActivityLevel::Sedentary));
        assert!((bmr - 1714.0).abs() < 1e-9);
    }

    #[test]
    fn test_tdee_moderately_active() {
        let tdee = compute_tdee(&profile(Sex::Male, ActivityLevel::ModeratelyActive));
        assert_eq!(tdee.round() as i64, 2914);
    }

    #[rstest]
    #[case(ActivityLevel::Sedentary, 1.2)]
    #[case(ActivityLevel::LightlyActive, 1.375)]
    #[case(ActivityLevel::ModeratelyActive, 1.55)]
    #[case(ActivityLevel::VeryActive, 1.725)]
    #[case(ActivityLevel::ExtremelyActive, 1.9)]
    fn test_activity_multiplier_table(#[case] level: ActivityLevel, #[case] expected: f64) {
        assert_eq!(level.multiplier(), expected);
    }

    #[rstest]
    #[case("sedentary", ActivityLevel::Sedentary)]
    #[case("Moderately_Active", ActivityLevel::ModeratelyActive)]
    #[case("extra_active", ActivityLevel::ExtremelyActive)]
    #[case("couch", ActivityLevel::Sedentary)]
    #[case("", ActivityLevel::Sedentary)]
    fn test_activity_level_lenient_parse(#[case] input: &str, #[case] expected: ActivityLevel) {
        assert_eq!(ActivityLevel::parse_lenient(input), expected);
    }

    #[test]
    fn test_profile_deserialize_defaults() {
        let json = r#"{"sex":"nonbinary","mass_kg":60,"height_cm":165,"age_years":40}"#;
        let parsed: BodyProfile = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.sex, Sex::Female);
        assert_eq!(parsed.activity_level, ActivityLevel::Sedentary);

        let json = r#"{"sex":"MALE","mass_kg":60,"height_cm":165,"age_years":40,"activity_level":null}"#;
        let parsed: BodyProfile = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.sex, Sex::Male);
        assert_eq!(parsed.activity_level, ActivityLevel::Sedentary);
    }

    #[test]
    fn test_profile_serializes_snake_case() {
        let value = serde_json::to_value(profile(Sex::Male, ActivityLevel::ExtremelyActive)).unwrap();
        assert_eq!(value["sex"], "male");
        assert_eq!(value["activity_level"], "extremely_active");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: TDEE is exactly BMR times the table multiplier
        #[test]
        fn prop_tdee_is_bmr_times_multiplier(
            mass in 30.0f64..200.0,
            height in 120.0f64..220.0,
            age in 15i32..90,
            level_idx in 0usize..5,
            male in any::<bool>()
        ) {
            let p = BodyProfile {
                sex: if male { Sex::Male } else { Sex::Female },
                mass_kg: mass,
                height_cm: height,
                age_years: age,
                activity_level: ACTIVITY_MULTIPLIERS[level_idx].0,
            };
            prop_assert_eq!(compute_tdee(&p), compute_bmr(&p) * ACTIVITY_MULTIPLIERS[level_idx].1);
            // Pure: same input, same output
            prop_assert_eq!(compute_bmr(&p), compute_bmr(&p.clone()));
        }

        /// Property: male BMR is always 166 kcal above female BMR
        #[test]
        fn prop_sex_constant_gap(
            mass in 40.0f64..150.0,
            height in 140.0f64..210.0,
            age in 18i32..80
        ) {
            let male = BodyProfile { sex: Sex::Male, mass_kg: mass, height_cm: height, age_years: age, activity_level: ActivityLevel::Sedentary };
            let female = BodyProfile { sex: Sex::Female, ..male.clone() };
            prop_assert!((compute_bmr(&male) - compute_bmr(&female) - 166.0).abs() < 1e-9);
        }
    }
}
