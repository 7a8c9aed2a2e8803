//! Handler error type.
//!
//! `AppError::Api` carries a classified failure; every other variant is
//! unclassified and is reported to clients as a generic server error.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    response::{IntoResponse, Response},
};
use domain::DomainError;
use thiserror::Error;

use crate::error_code::{ErrorCode, UserErrorCode};
use crate::exception::ApiError;
use crate::handler;

/// Application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[cfg(feature = "database")]
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn bad_request(description: impl Into<String>) -> Self {
        AppError::Api(ApiError::with_description(&ErrorCode::BadRequest, description))
    }

    pub fn user_not_found() -> Self {
        DomainError::not_found("user").into()
    }

    /// The classified failure, if any
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            AppError::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        handler::resolve(&self).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Password(msg) => AppError::bad_request(msg),
            DomainError::Conflict(_) => AppError::bad_request(err.to_string()),
            DomainError::NotFound(_) => AppError::Api(ApiError::with_source(
                &UserErrorCode::UserNotFound,
                err,
            )),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

// =============================================================================
// Extractor Rejections
// =============================================================================

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_user_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_user_not_found(self) -> AppResult<T> {
        self.ok_or_else(AppError::user_not_found)
    }
}
