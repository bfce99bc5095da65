//! Session token verification
//!
//! Session tokens are HS256 JWTs minted by the identity provider with the
//! user's id in `sub`. The backend only verifies them; `issue_session_token`
//! exists for tests and local tooling.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Identity-provider session id, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
}

impl SessionClaims {
    /// Parse the subject as a user id
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| anyhow::anyhow!("Subject is not a user id"))
    }
}

/// Pre-computed signing keys; created once at startup and shared via `Arc`
#[derive(Clone)]
struct SessionKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

/// Verifier for identity-provider session tokens
#[derive(Clone)]
pub struct SessionVerifier {
    keys: SessionKeys,
    validation: Arc<Validation>,
    token_lifetime_secs: i64,
}

impl SessionVerifier {
    /// Create a verifier with pre-computed keys
    ///
    /// Call this once at application startup and store in AppState.
    pub fn new(secret: &str, token_lifetime_secs: i64) -> Self {
        let mut validation = Validation::default();
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            keys: SessionKeys {
                encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
                decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            },
            validation: Arc::new(validation),
            token_lifetime_secs,
        }
    }

    /// Mint a session token for a user
    pub fn issue_session_token(&self, user_id: Uuid) -> Result<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            exp: (now + Duration::seconds(self.token_lifetime_secs)).timestamp(),
            iat: now.timestamp(),
            sid: Some(Uuid::new_v4().to_string()),
        };

        encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to issue session token: {}", e))
    }

    /// Verify a token and return its claims
    pub fn verify(&self, token: &str) -> Result<SessionClaims> {
        let token_data = decode::<SessionClaims>(token, &self.keys.decoding, &self.validation)
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }
}
