//! Meal log repository

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use smart_vitals_shared::{ConsumptionEvent, Macros};
use sqlx::PgPool;
use uuid::Uuid;

use super::{decimal_to_f64, to_decimal_opt};

/// Meal log record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MealLogRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: Option<String>,
    pub meal_type: Option<String>,
    pub calories: Option<Decimal>,
    pub protein_g: Option<Decimal>,
    pub carbs_g: Option<Decimal>,
    pub fat_g: Option<Decimal>,
    pub consumed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<MealLogRecord> for ConsumptionEvent {
    fn from(record: MealLogRecord) -> Self {
        ConsumptionEvent {
            id: record.id,
            user_id: record.user_id,
            timestamp_utc: record.consumed_at,
            name: record.name,
            meal_type: record.meal_type,
            calories: record.calories.as_ref().map(decimal_to_f64),
            macros: Macros {
                protein_g: record.protein_g.as_ref().map(decimal_to_f64),
                carbs_g: record.carbs_g.as_ref().map(decimal_to_f64),
                fat_g: record.fat_g.as_ref().map(decimal_to_f64),
            },
        }
    }
}

/// Input for creating a meal log
#[derive(Debug, Clone)]
pub struct CreateMealLog {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub meal_type: Option<String>,
    pub calories: Option<f64>,
    pub macros: Macros,
    pub consumed_at: DateTime<Utc>,
}

/// Meal log repository for database operations
pub struct MealLogRepository;

impl MealLogRepository {
    /// Create a new meal log entry
    pub async fn create(pool: &PgPool, input: CreateMealLog) -> Result<MealLogRecord> {
        let record = sqlx::query_as::<_, MealLogRecord>(
            r#"
            INSERT INTO meal_logs (user_id, name, meal_type, calories, protein_g, carbs_g, fat_g, consumed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, name, meal_type, calories, protein_g, carbs_g, fat_g, consumed_at, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.name)
        .bind(&input.meal_type)
        .bind(to_decimal_opt(input.calories)?)
        .bind(to_decimal_opt(input.macros.protein_g)?)
        .bind(to_decimal_opt(input.macros.carbs_g)?)
        .bind(to_decimal_opt(input.macros.fat_g)?)
        .bind(input.consumed_at)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Get meal logs for a user within an inclusive time range
    pub async fn get_by_date_range(
        pool: &PgPool,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MealLogRecord>> {
        let records = sqlx::query_as::<_, MealLogRecord>(
            r#"
            SELECT id, user_id, name, meal_type, calories, protein_g, carbs_g, fat_g, consumed_at, created_at
            FROM meal_logs
            WHERE user_id = $1 AND consumed_at >= $2 AND consumed_at <= $3
            ORDER BY consumed_at ASC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Delete a meal log
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM meal_logs
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
