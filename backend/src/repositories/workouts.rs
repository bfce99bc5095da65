//! Workout repository

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use smart_vitals_shared::{ExpenditureEvent, WorkoutStatus};
use sqlx::PgPool;
use uuid::Uuid;

use super::{decimal_to_f64, to_decimal, to_decimal_opt};

/// Workout record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub exercise_name: String,
    pub met_category: Option<String>,
    pub status: String,
    pub duration_minutes: Decimal,
    pub calories_burned: Option<Decimal>,
    pub performed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<WorkoutRecord> for ExpenditureEvent {
    type Error = anyhow::Error;

    fn try_from(record: WorkoutRecord) -> Result<Self> {
        let status = record
            .status
            .parse::<WorkoutStatus>()
            .map_err(|e| anyhow::anyhow!("workout {}: {}", record.id, e))?;

        Ok(ExpenditureEvent {
            id: record.id,
            user_id: record.user_id,
            timestamp_utc: record.performed_at,
            exercise_name: record.exercise_name,
            met_category: record.met_category,
            status,
            duration_minutes: decimal_to_f64(&record.duration_minutes),
            calories_burned: record.calories_burned.as_ref().map(decimal_to_f64),
        })
    }
}

/// Input for creating a workout
#[derive(Debug, Clone)]
pub struct CreateWorkout {
    pub user_id: Uuid,
    pub exercise_name: String,
    pub met_category: Option<String>,
    pub status: WorkoutStatus,
    pub duration_minutes: f64,
    pub calories_burned: Option<f64>,
    pub performed_at: DateTime<Utc>,
}

const WORKOUT_COLUMNS: &str = "id, user_id, exercise_name, met_category, status, duration_minutes, \
                               calories_burned, performed_at, created_at, updated_at";

/// Workout repository for database operations
pub struct WorkoutRepository;

impl WorkoutRepository {
    /// Create a new workout
    pub async fn create(pool: &PgPool, input: CreateWorkout) -> Result<WorkoutRecord> {
        let sql = format!(
            r#"
            INSERT INTO workouts (user_id, exercise_name, met_category, status, duration_minutes, calories_burned, performed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {WORKOUT_COLUMNS}
            "#
        );

        let record = sqlx::query_as::<_, WorkoutRecord>(&sql)
            .bind(input.user_id)
            .bind(&input.exercise_name)
            .bind(&input.met_category)
            .bind(input.status.as_str())
            .bind(to_decimal(input.duration_minutes)?)
            .bind(to_decimal_opt(input.calories_burned)?)
            .bind(input.performed_at)
            .fetch_one(pool)
            .await?;

        Ok(record)
    }

    /// Get workouts for a user within an inclusive time range
    ///
    /// `status` narrows the result to one lifecycle state.
    pub async fn get_by_date_range(
        pool: &PgPool,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: Option<WorkoutStatus>,
    ) -> Result<Vec<WorkoutRecord>> {
        let sql = format!(
            r#"
            SELECT {WORKOUT_COLUMNS}
            FROM workouts
            WHERE user_id = $1 AND performed_at >= $2 AND performed_at <= $3
              AND ($4::TEXT IS NULL OR status = $4)
            ORDER BY performed_at ASC
            "#
        );

        let records = sqlx::query_as::<_, WorkoutRecord>(&sql)
            .bind(user_id)
            .bind(start)
            .bind(end)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(pool)
            .await?;

        Ok(records)
    }

    /// Move a workout to a new status
    pub async fn update_status(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        status: WorkoutStatus,
    ) -> Result<Option<WorkoutRecord>> {
        let sql = format!(
            r#"
            UPDATE workouts
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {WORKOUT_COLUMNS}
            "#
        );

        let record = sqlx::query_as::<_, WorkoutRecord>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await?;

        Ok(record)
    }

    /// Delete a workout
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM workouts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
