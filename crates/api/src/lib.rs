//! Delivery API Library
//!
//! HTTP REST surface for user management: axum router, handlers, extractors,
//! request logging and OpenAPI docs on top of `user_service_lib`.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use user_service_lib::build_user_service;
use user_service_lib::infra::Database;

use crate::config::ApiConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Connect, migrate and serve until the process is stopped.
pub async fn run_server(config: ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let db = Database::connect(&config.database).await?;

    // Composition root
    let user_service = build_user_service(&db);
    let state = AppState::new(user_service, Arc::new(db));

    let app = create_router(state);

    let addr: SocketAddr = config.service.addr().parse()?;
    info!(service = %config.service.service_name, "listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
