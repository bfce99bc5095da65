//! Authentication extractor
//!
//! Resolves the bearer session token on every `/api/v1` request into the
//! authenticated user's id.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

/// Authenticated user extracted from the session token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))?;

        let claims = app_state
            .sessions()
            .verify(token)
            .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

        let user_id = claims
            .user_id()
            .map_err(|_| ApiError::Unauthorized("Invalid user ID in token".to_string()))?;

        Ok(AuthUser { user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    async fn extract(header: Option<String>) -> Result<AuthUser, ApiError> {
        let state = AppState::for_tests(AppConfig::default());
        let mut builder = Request::builder().uri("/api/v1/energy/balance");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        AuthUser::from_request_parts(&mut parts, &state).await
    }

    #[tokio::test]
    async fn test_missing_header_rejected() {
        assert!(matches!(extract(None).await, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_non_bearer_rejected() {
        let result = extract(Some("Basic dXNlcjpwYXNz".to_string())).await;
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_valid_token_resolves_user() {
        let state = AppState::for_tests(AppConfig::default());
        let user_id = Uuid::new_v4();
        let token = state.sessions().issue_session_token(user_id).unwrap();

        let user = extract(Some(format!("Bearer {}", token))).await.unwrap();
        assert_eq!(user.user_id, user_id);
    }
}
