//! Meal log API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::MealService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use smart_vitals_shared::types::{DeletedResponse, HistoryQuery, LogMealRequest};
use smart_vitals_shared::ConsumptionEvent;
use uuid::Uuid;

/// Create meal routes
pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(log_meal).get(get_meal_history))
        .route("/:id", delete(delete_meal))
}

/// POST /api/v1/meals - Log a meal
async fn log_meal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogMealRequest>,
) -> Result<(StatusCode, Json<ConsumptionEvent>), ApiError> {
    let meal = MealService::log_meal(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(meal)))
}

/// GET /api/v1/meals?start=&end= - Meal history
async fn get_meal_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<ConsumptionEvent>>, ApiError> {
    let meals = MealService::get_meal_history(state.db(), auth.user_id, &query).await?;
    Ok(Json(meals))
}

/// DELETE /api/v1/meals/:id
async fn delete_meal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError> {
    MealService::delete_meal(state.db(), auth.user_id, id).await?;
    Ok(Json(DeletedResponse {
        id: id.to_string(),
        deleted: true,
    }))
}
