//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::health_handler::{HealthResponse, ServiceHealth};
use crate::handlers::user_handler::{UserRegisterRequest, UserUpdateRequest};
use domain::{UserResponse, UserStatus};

/// API documentation struct.
///
/// Documented bodies are the `body` field of the result envelope.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_handler::health_check,
        crate::handlers::user_handler::register,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::unregister_user,
    ),
    components(
        schemas(
            UserRegisterRequest,
            UserUpdateRequest,
            UserResponse,
            UserStatus,
            HealthResponse,
            ServiceHealth,
        )
    ),
    tags(
        (name = "Users", description = "User registration and management"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;
