//! Workout API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::WorkoutService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, post, put},
    Json, Router,
};
use smart_vitals_shared::types::{
    DeletedResponse, HistoryQuery, LogWorkoutRequest, UpdateWorkoutStatusRequest,
};
use smart_vitals_shared::ExpenditureEvent;
use uuid::Uuid;

/// Create workout routes
pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(log_workout).get(get_workout_history))
        .route("/:id", delete(delete_workout))
        .route("/:id/status", put(update_workout_status))
}

/// POST /api/v1/workouts - Log a workout
async fn log_workout(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogWorkoutRequest>,
) -> Result<(StatusCode, Json<ExpenditureEvent>), ApiError> {
    let workout = WorkoutService::log_workout(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

/// GET /api/v1/workouts?start=&end=&status= - Workout history
async fn get_workout_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<ExpenditureEvent>>, ApiError> {
    let workouts = WorkoutService::get_workout_history(state.db(), auth.user_id, &query).await?;
    Ok(Json(workouts))
}

/// PUT /api/v1/workouts/:id/status
async fn update_workout_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateWorkoutStatusRequest>,
) -> Result<Json<ExpenditureEvent>, ApiError> {
    let workout = WorkoutService::update_status(state.db(), auth.user_id, id, req.status).await?;
    Ok(Json(workout))
}

/// DELETE /api/v1/workouts/:id
async fn delete_workout(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError> {
    WorkoutService::delete_workout(state.db(), auth.user_id, id).await?;
    Ok(Json(DeletedResponse {
        id: id.to_string(),
        deleted: true,
    }))
}
