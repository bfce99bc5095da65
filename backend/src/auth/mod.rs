//! Authentication module
//!
//! Verifies identity-provider session tokens (HS256 JWT) on API requests.

mod jwt;
mod middleware;

pub use jwt::{SessionClaims, SessionVerifier};
pub use middleware::AuthUser;
