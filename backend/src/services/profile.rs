//! Body profile service

use crate::error::ApiError;
use crate::repositories::{BodyProfileRepository, UpsertBodyProfile};
use smart_vitals_shared::types::UpsertProfileRequest;
use smart_vitals_shared::validation::{validate_body_profile, validate_mass_kg, ValidationError};
use smart_vitals_shared::StoredProfile;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Body profile service
pub struct ProfileService;

impl ProfileService {
    /// Validate and store the user's profile and goal
    pub async fn upsert_profile(
        pool: &PgPool,
        user_id: Uuid,
        request: UpsertProfileRequest,
    ) -> Result<StoredProfile, ApiError> {
        Self::validate(&request)?;

        let record = BodyProfileRepository::upsert(
            pool,
            UpsertBodyProfile {
                user_id,
                profile: request.profile,
                goal: request.goal,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(%user_id, "Body profile updated");
        Ok(record.into())
    }

    /// The user's stored profile
    pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<StoredProfile, ApiError> {
        BodyProfileRepository::get(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .map(StoredProfile::from)
            .ok_or_else(|| ApiError::NotFound("Body profile not found".to_string()))
    }

    fn validate(request: &UpsertProfileRequest) -> Result<(), ApiError> {
        validate_body_profile(&request.profile)?;

        if let Some(target) = request.goal.as_ref().and_then(|g| g.target_mass_kg) {
            validate_mass_kg(target)
                .map_err(|e| ValidationError::new("target_mass_kg", &e))?;
        }
        Ok(())
    }
}
