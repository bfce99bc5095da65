//! Energy engine API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::EnergyService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use smart_vitals_shared::types::{
    CalorieTargetRequest, CalorieTargetResponse, EnergyBalanceQuery, EstimateCaloriesRequest,
    EstimateCaloriesResponse,
};
use smart_vitals_shared::EnergyBalance;

/// Create energy routes
pub fn energy_routes() -> Router<AppState> {
    Router::new()
        .route("/target", post(compute_calorie_target).get(get_stored_calorie_target))
        .route("/estimate", post(estimate_workout_calories))
        .route("/balance", get(get_energy_balance))
}

/// POST /api/v1/energy/target - Target for an explicit profile and goal
async fn compute_calorie_target(
    _auth: AuthUser,
    Json(req): Json<CalorieTargetRequest>,
) -> Result<Json<CalorieTargetResponse>, ApiError> {
    Ok(Json(EnergyService::get_calorie_target(&req)?))
}

/// GET /api/v1/energy/target - Target for the stored profile and goal
async fn get_stored_calorie_target(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<CalorieTargetResponse>, ApiError> {
    let response = EnergyService::get_stored_calorie_target(state.data(), auth.user_id).await?;
    Ok(Json(response))
}

/// POST /api/v1/energy/estimate - Calories burned by one workout
async fn estimate_workout_calories(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<EstimateCaloriesRequest>,
) -> Result<Json<EstimateCaloriesResponse>, ApiError> {
    Ok(Json(EnergyService::estimate_workout_calories(
        state.met_table(),
        &req,
    )?))
}

/// GET /api/v1/energy/balance?period=daily|weekly|monthly
async fn get_energy_balance(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<EnergyBalanceQuery>,
) -> Result<Json<EnergyBalance>, ApiError> {
    let balance = EnergyService::get_energy_balance(
        state.data(),
        state.met_table(),
        auth.user_id,
        query.period.as_deref(),
        Utc::now(),
    )
    .await?;

    Ok(Json(balance))
}
