//! Body profile API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{extract::State, routing::put, Json, Router};
use smart_vitals_shared::types::UpsertProfileRequest;
use smart_vitals_shared::StoredProfile;

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/", put(upsert_profile).get(get_profile))
}

/// PUT /api/v1/profile - Store body profile and goal
async fn upsert_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpsertProfileRequest>,
) -> Result<Json<StoredProfile>, ApiError> {
    let stored = ProfileService::upsert_profile(state.db(), auth.user_id, req).await?;
    Ok(Json(stored))
}

/// GET /api/v1/profile
async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<StoredProfile>, ApiError> {
    Ok(Json(ProfileService::get_profile(state.db(), auth.user_id).await?))
}
