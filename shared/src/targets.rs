//! Daily calorie and macronutrient targets
//!
//! Turns a body profile and a goal into a daily calorie figure (TDEE plus a
//! goal-specific delta, clamped to a floor) and a fixed-percentage macro split.

use crate::health_metrics::{compute_tdee, BodyProfile, Sex};
use serde::{Deserialize, Serialize};

/// Minimum daily calories for male profiles
pub const MALE_CALORIE_FLOOR: i32 = 1500;
/// Minimum daily calories for every other profile
pub const FEMALE_CALORIE_FLOOR: i32 = 1200;

/// Daily deficit applied for weight loss
pub const WEIGHT_LOSS_DELTA_KCAL: f64 = -500.0;
/// Daily surplus applied for muscle gain
pub const MUSCLE_GAIN_DELTA_KCAL: f64 = 300.0;

/// Share of calories and energy density for one macronutrient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroShare {
    pub fraction: f64,
    pub kcal_per_gram: f64,
}

impl MacroShare {
    /// Grams of this macro for the given calorie budget, rounded
    pub fn grams_for(&self, calories: i32) -> i32 {
        (calories as f64 * self.fraction / self.kcal_per_gram).round() as i32
    }
}

/// Fixed protein/fat/carbs split (25% / 30% / 45%)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroSplit {
    pub protein: MacroShare,
    pub fat: MacroShare,
    pub carbs: MacroShare,
}

pub const MACRO_SPLIT: MacroSplit = MacroSplit {
    protein: MacroShare { fraction: 0.25, kcal_per_gram: 4.0 },
    fat: MacroShare { fraction: 0.30, kcal_per_gram: 9.0 },
    carbs: MacroShare { fraction: 0.45, kcal_per_gram: 4.0 },
};

/// Kind of body-composition goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum GoalKind {
    LoseWeight,
    GainMuscle,
    #[default]
    Maintain,
}

impl From<String> for GoalKind {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "lose_weight" => GoalKind::LoseWeight,
            "gain_muscle" => GoalKind::GainMuscle,
            _ => GoalKind::Maintain,
        }
    }
}

impl GoalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalKind::LoseWeight => "lose_weight",
            GoalKind::GainMuscle => "gain_muscle",
            GoalKind::Maintain => "maintain",
        }
    }

    /// Calorie delta applied on top of TDEE
    pub fn calorie_delta(&self) -> f64 {
        match self {
            GoalKind::LoseWeight => WEIGHT_LOSS_DELTA_KCAL,
            GoalKind::GainMuscle => MUSCLE_GAIN_DELTA_KCAL,
            GoalKind::Maintain => 0.0,
        }
    }
}

/// The user's active goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GoalSpec {
    #[serde(default)]
    pub kind: GoalKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_mass_kg: Option<f64>,
}

/// Derived daily intake target; recomputed on demand, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalorieTarget {
    pub daily_calories: i32,
    pub protein_g: i32,
    pub carbs_g: i32,
    pub fat_g: i32,
}

/// Calorie floor for a sex
///
/// Applied verbatim regardless of the profile's own BMR.
pub fn calorie_floor(sex: Sex) -> i32 {
    match sex {
        Sex::Male => MALE_CALORIE_FLOOR,
        Sex::Female => FEMALE_CALORIE_FLOOR,
    }
}

/// Compute the daily calorie target and macro grams for a profile and goal
pub fn compute_target(profile: &BodyProfile, goal: &GoalSpec) -> CalorieTarget {
    let adjusted = (compute_tdee(profile) + goal.kind.calorie_delta()).round() as i32;
    let daily_calories = adjusted.max(calorie_floor(profile.sex));

    CalorieTarget {
        daily_calories,
        protein_g: MACRO_SPLIT.protein.grams_for(daily_calories),
        carbs_g: MACRO_SPLIT.carbs.grams_for(daily_calories),
        fat_g: MACRO_SPLIT.fat.grams_for(daily_calories),
    }
}

impl CalorieTarget {
    /// Calories implied by the macro grams (4/4/9 kcal per gram)
    pub fn macro_calories(&self) -> i32 {
        self.protein_g * 4 + self.carbs_g * 4 + self.fat_g * 9
    }
}
