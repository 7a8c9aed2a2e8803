//! Health check handlers.

use axum::{extract::State, routing::get, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use common::{ApiResponse, AppError, AppResult};

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub database: ServiceHealth,
}

/// Dependency health.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ServiceHealth {
    pub status: String,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Health check endpoint - verifies database connectivity.
///
/// An unreachable database is reported as `SERVER_ERROR`; the cause is only logged.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "All dependencies reachable", body = HealthResponse),
        (status = 500, description = "Database unreachable")
    )
)]
pub async fn health_check(State(state): State<AppState>) -> AppResult<ApiResponse<HealthResponse>> {
    state
        .database
        .ping()
        .await
        .map_err(|e| AppError::internal(format!("database health check failed: {}", e)))?;

    Ok(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        database: ServiceHealth {
            status: "healthy".to_string(),
        },
    }))
}
