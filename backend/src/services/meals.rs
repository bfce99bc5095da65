//! Meal logging service

use crate::error::ApiError;
use crate::repositories::{CreateMealLog, MealLogRepository};
use chrono::{DateTime, Duration, Utc};
use smart_vitals_shared::types::{HistoryQuery, LogMealRequest};
use smart_vitals_shared::validation::{validate_macros, validate_time_range, ValidationError};
use smart_vitals_shared::ConsumptionEvent;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// History window used when a query gives no start
pub const DEFAULT_HISTORY_DAYS: i64 = 30;

/// Meal logging service
pub struct MealService;

impl MealService {
    /// Log a meal
    pub async fn log_meal(
        pool: &PgPool,
        user_id: Uuid,
        request: LogMealRequest,
    ) -> Result<ConsumptionEvent, ApiError> {
        request.validate()?;
        validate_macros(&request.macros)?;

        let input = CreateMealLog {
            user_id,
            name: request.name,
            meal_type: request.meal_type,
            calories: request.calories,
            macros: request.macros,
            consumed_at: request.consumed_at.unwrap_or_else(Utc::now),
        };

        let record = MealLogRepository::create(pool, input)
            .await
            .map_err(ApiError::Internal)?;
        info!(%user_id, meal_id = %record.id, "Meal logged");

        Ok(record.into())
    }

    /// Meals in a time range, oldest first
    pub async fn get_meal_history(
        pool: &PgPool,
        user_id: Uuid,
        query: &HistoryQuery,
    ) -> Result<Vec<ConsumptionEvent>, ApiError> {
        let (start, end) = resolve_history_range(query, Utc::now())?;

        let records = MealLogRepository::get_by_date_range(pool, user_id, start, end)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(ConsumptionEvent::from).collect())
    }

    /// Delete one of the user's meals
    pub async fn delete_meal(pool: &PgPool, user_id: Uuid, meal_id: Uuid) -> Result<(), ApiError> {
        let deleted = MealLogRepository::delete(pool, meal_id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Meal not found".to_string()));
        }
        Ok(())
    }
}

/// Resolve optional history bounds: `end` defaults to now, `start` to
/// `DEFAULT_HISTORY_DAYS` before `end`
pub fn resolve_history_range(
    query: &HistoryQuery,
    now: DateTime<Utc>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ApiError> {
    let end = query.end.unwrap_or(now);
    let start = query
        .start
        .unwrap_or_else(|| end - Duration::days(DEFAULT_HISTORY_DAYS));

    validate_time_range(start, end).map_err(|e| ValidationError::new("start", &e))?;
    Ok((start, end))
}
