//! Route configuration.

use axum::{middleware, Router};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::handle_panic;

use crate::handlers::{health_routes, open_user_routes, user_routes};
use crate::middleware::logger_middleware;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
///
/// Layer order, outermost first: CORS, tracing spans, body logging, panic
/// recovery. Panics therefore reach the logger as a rendered 500 envelope.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Registration needs no account
        .nest("/open-api/user", open_user_routes())
        .nest("/api/user", user_routes())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(logger_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
