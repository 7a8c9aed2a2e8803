//! User handlers.
//!
//! Every response is wrapped in the result envelope; failures are rendered by
//! the exception handler through `AppError`.

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::{ApiResponse, AppResult};
use domain::{EntityId, RegisterUser, UpdateUser, UserResponse};

use crate::extractors::{ApiPath, ValidatedJson};
use crate::state::AppState;

/// Registration request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserRegisterRequest {
    #[validate(length(min = 1, max = 50, message = "name must be 1 to 50 characters"))]
    #[schema(example = "Kim Minsu")]
    pub name: String,
    #[validate(
        email(message = "email is not a valid address"),
        length(max = 100, message = "email must be at most 100 characters")
    )]
    #[schema(example = "minsu@example.com")]
    pub email: String,
    #[validate(length(min = 8, max = 64, message = "password must be 8 to 64 characters"))]
    #[schema(example = "password123")]
    pub password: String,
    #[validate(length(min = 1, max = 150, message = "address must be 1 to 150 characters"))]
    #[schema(example = "Seoul, Gangnam-gu")]
    pub address: String,
}

impl From<UserRegisterRequest> for RegisterUser {
    fn from(request: UserRegisterRequest) -> Self {
        RegisterUser {
            name: request.name,
            email: request.email,
            password: request.password,
            address: request.address,
        }
    }
}

/// Profile update request. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UserUpdateRequest {
    #[validate(length(min = 1, max = 50, message = "name must be 1 to 50 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 150, message = "address must be 1 to 150 characters"))]
    pub address: Option<String>,
}

impl From<UserUpdateRequest> for UpdateUser {
    fn from(request: UserUpdateRequest) -> Self {
        UpdateUser {
            name: request.name,
            address: request.address,
        }
    }
}

/// Routes reachable without an account
pub fn open_user_routes() -> Router<AppState> {
    Router::new().route("/register", post(register))
}

/// Account management routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route(
            "/:id",
            get(get_user).put(update_user).delete(unregister_user),
        )
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/open-api/user/register",
    tag = "Users",
    request_body = UserRegisterRequest,
    responses(
        (status = 200, description = "User registered", body = UserResponse),
        (status = 400, description = "Validation error or email already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserRegisterRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.register(payload.into()).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}

/// List registered users
#[utoipa::path(
    get,
    path = "/api/user",
    tag = "Users",
    responses(
        (status = 200, description = "Registered users", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = state.user_service.list_users().await?;
    Ok(ApiResponse::success(
        users.into_iter().map(UserResponse::from).collect(),
    ))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/user/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.get_user(EntityId(id)).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}

/// Update name and/or address
#[utoipa::path(
    put,
    path = "/api/user/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UserUpdateRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<UserUpdateRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state
        .user_service
        .update_user(EntityId(id), payload.into())
        .await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}

/// Unregister a user (soft delete)
#[utoipa::path(
    delete,
    path = "/api/user/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User unregistered", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn unregister_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.unregister_user(EntityId(id)).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> UserRegisterRequest {
        UserRegisterRequest {
            name: "Kim".to_string(),
            email: "kim@example.com".to_string(),
            password: "password123".to_string(),
            address: "Seoul".to_string(),
        }
    }

    #[test]
    fn test_register_request_validation() {
        assert!(valid_request().validate().is_ok());

        let mut bad_email = valid_request();
        bad_email.email = "not-an-email".to_string();
        assert!(bad_email.validate().is_err());

        let mut short_password = valid_request();
        short_password.password = "short".to_string();
        assert!(short_password.validate().is_err());

        let mut long_name = valid_request();
        long_name.name = "a".repeat(51);
        assert!(long_name.validate().is_err());
    }

    #[test]
    fn test_update_request_allows_absent_fields() {
        assert!(UserUpdateRequest::default().validate().is_ok());

        let empty_name = UserUpdateRequest {
            name: Some(String::new()),
            address: None,
        };
        assert!(empty_name.validate().is_err());
    }
}
