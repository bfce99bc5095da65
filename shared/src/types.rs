//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::health_metrics::BodyProfile;
use crate::models::{Macros, WorkoutStatus};
use crate::targets::{CalorieTarget, GoalSpec};

// ============================================================================
// Energy Types
// ============================================================================

/// Calorie target request: an explicit profile and goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieTargetRequest {
    pub profile: BodyProfile,
    #[serde(default)]
    pub goal: GoalSpec,
}

/// Calorie target with the BMR/TDEE it was derived from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieTargetResponse {
    pub bmr: f64,
    pub tdee: f64,
    pub activity_multiplier: f64,
    /// True when the sex-specific floor raised the figure
    pub floor_applied: bool,
    #[serde(flatten)]
    pub target: CalorieTarget,
}

/// Workout calorie estimate request
///
/// Either an explicit `met_value` or an `exercise_name` to classify.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EstimateCaloriesRequest {
    #[serde(default)]
    #[validate(range(exclusive_min = 0.0, max = 25.0))]
    pub met_value: Option<f64>,
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub exercise_name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub met_category: Option<String>,
    #[validate(range(min = 20.0, max = 500.0))]
    pub mass_kg: f64,
    #[validate(range(min = 0.0, max = 1440.0))]
    pub duration_minutes: f64,
}

/// Workout calorie estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateCaloriesResponse {
    pub met_value: f64,
    pub calories: i64,
}

/// Energy balance query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnergyBalanceQuery {
    #[serde(default)]
    pub period: Option<String>,
}

// ============================================================================
// Meal Log Types
// ============================================================================

/// Meal log request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogMealRequest {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub meal_type: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 50000.0))]
    pub calories: Option<f64>,
    #[serde(default)]
    pub macros: Macros,
    /// Defaults to the time of the request
    #[serde(default)]
    pub consumed_at: Option<DateTime<Utc>>,
}

/// Time range filter for history endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    /// Workouts only
    #[serde(default)]
    pub status: Option<WorkoutStatus>,
}

// ============================================================================
// Workout Types
// ============================================================================

/// Workout log request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogWorkoutRequest {
    #[validate(length(min = 1, max = 200))]
    pub exercise_name: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub met_category: Option<String>,
    /// Defaults to completed
    #[serde(default)]
    pub status: Option<WorkoutStatus>,
    #[validate(range(min = 0.0, max = 1440.0))]
    pub duration_minutes: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 50000.0))]
    pub calories_burned: Option<f64>,
    /// Defaults to the time of the request
    #[serde(default)]
    pub performed_at: Option<DateTime<Utc>>,
}

/// Workout status change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWorkoutStatusRequest {
    pub status: WorkoutStatus,
}

// ============================================================================
// Profile Types
// ============================================================================

/// Body profile and goal upsert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertProfileRequest {
    pub profile: BodyProfile,
    #[serde(default)]
    pub goal: Option<GoalSpec>,
}

/// Deleted-resource acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub id: String,
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_length_is_bounded() {
        let mut request: LogMealRequest =
            serde_json::from_str(r#"{"name":"Oats","meal_type":"breakfast","calories":350}"#).unwrap();
        assert!(request.validate().is_ok());

        request.meal_type = Some("b".repeat(51));
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("meal_type"));
    }

    #[test]
    fn test_met_category_length_is_bounded() {
        let mut workout: LogWorkoutRequest = serde_json::from_str(
            r#"{"exercise_name":"Deadlifts","met_category":"strength","duration_minutes":45}"#,
        )
        .unwrap();
        assert!(workout.validate().is_ok());

        workout.met_category = Some("s".repeat(51));
        assert!(workout.validate().unwrap_err().field_errors().contains_key("met_category"));

        let mut estimate: EstimateCaloriesRequest = serde_json::from_str(
            r#"{"exercise_name":"Deadlifts","met_category":"strength","mass_kg":80,"duration_minutes":30}"#,
        )
        .unwrap();
        assert!(estimate.validate().is_ok());

        estimate.met_category = Some("s".repeat(51));
        assert!(estimate.validate().unwrap_err().field_errors().contains_key("met_category"));
    }
}
