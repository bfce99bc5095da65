//! Data models for the Smart Vitals energy engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::VitalsError;
use crate::health_metrics::BodyProfile;
use crate::targets::GoalSpec;

/// Macronutrient grams for a meal; missing values count as zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    #[serde(default)]
    pub protein_g: Option<f64>,
    #[serde(default)]
    pub carbs_g: Option<f64>,
    #[serde(default)]
    pub fat_g: Option<f64>,
}

/// A meal log: one consumption of food energy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub timestamp_utc: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub macros: Macros,
}

impl ConsumptionEvent {
    /// Calories, treating a missing value as zero
    pub fn calories_or_zero(&self) -> f64 {
        self.calories.unwrap_or(0.0)
    }
}

/// Lifecycle of a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
    Planned,
    InProgress,
    Completed,
}

impl WorkoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutStatus::Planned => "planned",
            WorkoutStatus::InProgress => "in_progress",
            WorkoutStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for WorkoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutStatus {
    type Err = VitalsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "planned" => Ok(WorkoutStatus::Planned),
            "in_progress" => Ok(WorkoutStatus::InProgress),
            "completed" => Ok(WorkoutStatus::Completed),
            other => Err(VitalsError::validation(format!(
                "Invalid workout status '{}'. Must be one of: planned, in_progress, completed",
                other
            ))),
        }
    }
}

/// A workout: one expenditure of energy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenditureEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub timestamp_utc: DateTime<Utc>,
    pub exercise_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub met_category: Option<String>,
    pub status: WorkoutStatus,
    pub duration_minutes: f64,
    /// Absent until logged by the user or backfilled by the estimator
    #[serde(default)]
    pub calories_burned: Option<f64>,
}

impl ExpenditureEvent {
    pub fn is_completed(&self) -> bool {
        self.status == WorkoutStatus::Completed
    }

    /// Calories burned, treating a missing value as zero
    pub fn calories_burned_or_zero(&self) -> f64 {
        self.calories_burned.unwrap_or(0.0)
    }
}

/// Persisted body profile and active goal for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProfile {
    pub user_id: Uuid,
    pub profile: BodyProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<GoalSpec>,
    pub updated_at: DateTime<Utc>,
}
