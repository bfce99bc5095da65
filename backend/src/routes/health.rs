//! Health check endpoints
//!
//! - /health: process is up, reports build info
//! - /health/ready: database reachable
//! - /health/live: always OK while the server runs

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

const SERVICE_NAME: &str = "smart-vitals";

/// Outcome of one dependency probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    Healthy,
    Unhealthy,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<DependencyChecks>,
}

impl HealthResponse {
    fn new(status: &'static str) -> Self {
        Self {
            service: SERVICE_NAME,
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks: None,
        }
    }
}

/// Dependency probes run by the readiness check
#[derive(Serialize)]
pub struct DependencyChecks {
    pub database: Probe,
}

#[derive(Serialize)]
pub struct Probe {
    pub status: ProbeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy"))
}

/// Readiness probe; 503 while the database is unreachable
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = match db::health_check(state.db()).await {
        Ok(()) => Probe {
            status: ProbeStatus::Healthy,
            message: None,
        },
        Err(e) => Probe {
            status: ProbeStatus::Unhealthy,
            message: Some(e.to_string()),
        },
    };

    let ready = database.status == ProbeStatus::Healthy;
    let mut response = HealthResponse::new(if ready { "ready" } else { "not_ready" });
    response.checks = Some(DependencyChecks { database });

    if ready {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("alive"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_reports_service() {
        let response = health_check().await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.service, "smart-vitals");
        assert!(response.checks.is_none());
    }

    #[tokio::test]
    async fn test_liveness_check_returns_alive() {
        assert_eq!(liveness_check().await.status, "alive");
    }

    #[test]
    fn test_probe_status_serializes_snake_case() {
        let json = serde_json::to_string(&ProbeStatus::Unhealthy).unwrap();
        assert_eq!(json, "\"unhealthy\"");
    }
}
