//! Workout logging service

use crate::error::ApiError;
use crate::repositories::{CreateWorkout, WorkoutRepository};
use crate::services::meals::resolve_history_range;
use chrono::Utc;
use smart_vitals_shared::types::{HistoryQuery, LogWorkoutRequest};
use smart_vitals_shared::{ExpenditureEvent, WorkoutStatus};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Workout logging service
pub struct WorkoutService;

impl WorkoutService {
    /// Log a workout; status defaults to completed
    ///
    /// `calories_burned` may be omitted and is then estimated when the
    /// workout is aggregated.
    pub async fn log_workout(
        pool: &PgPool,
        user_id: Uuid,
        request: LogWorkoutRequest,
    ) -> Result<ExpenditureEvent, ApiError> {
        request.validate()?;

        let input = CreateWorkout {
            user_id,
            exercise_name: request.exercise_name.trim().to_string(),
            met_category: request.met_category,
            status: request.status.unwrap_or(WorkoutStatus::Completed),
            duration_minutes: request.duration_minutes,
            calories_burned: request.calories_burned,
            performed_at: request.performed_at.unwrap_or_else(Utc::now),
        };

        let record = WorkoutRepository::create(pool, input)
            .await
            .map_err(ApiError::Internal)?;
        info!(%user_id, workout_id = %record.id, status = %record.status, "Workout logged");

        ExpenditureEvent::try_from(record).map_err(ApiError::Internal)
    }

    /// Workouts in a time range, optionally in one status
    pub async fn get_workout_history(
        pool: &PgPool,
        user_id: Uuid,
        query: &HistoryQuery,
    ) -> Result<Vec<ExpenditureEvent>, ApiError> {
        let (start, end) = resolve_history_range(query, Utc::now())?;

        let records = WorkoutRepository::get_by_date_range(pool, user_id, start, end, query.status)
            .await
            .map_err(ApiError::Internal)?;

        records
            .into_iter()
            .map(ExpenditureEvent::try_from)
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(ApiError::Internal)
    }

    /// Move a workout to a new status, e.g. planned to completed
    pub async fn update_status(
        pool: &PgPool,
        user_id: Uuid,
        workout_id: Uuid,
        status: WorkoutStatus,
    ) -> Result<ExpenditureEvent, ApiError> {
        let record = WorkoutRepository::update_status(pool, workout_id, user_id, status)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Workout not found".to_string()))?;

        info!(%user_id, %workout_id, %status, "Workout status updated");
        ExpenditureEvent::try_from(record).map_err(ApiError::Internal)
    }

    /// Delete one of the user's workouts
    pub async fn delete_workout(
        pool: &PgPool,
        user_id: Uuid,
        workout_id: Uuid,
    ) -> Result<(), ApiError> {
        let deleted = WorkoutRepository::delete(pool, workout_id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Workout not found".to_string()));
        }
        Ok(())
    }
}
