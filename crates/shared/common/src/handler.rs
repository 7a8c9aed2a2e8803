//! Exception handler: turns any failure into an envelope and a status.
//!
//! Resolution is first-match-wins:
//! 1. classified failures (`ApiError`) keep their catalog status and description;
//! 2. everything else, panics included, becomes `SERVER_ERROR` / HTTP 500.
//!
//! Both tiers log at error level before responding. Internal detail stays in
//! the log and never reaches the body.

use std::any::Any;
use std::error::Error as StdError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::AppError;
use crate::error_code::{ErrorCode, ErrorDescriptor};
use crate::exception::ApiError;
use crate::response::ErrorResponse;

/// Status plus envelope, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReply {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl IntoResponse for ErrorReply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Resolve a handler error.
pub fn resolve(err: &AppError) -> ErrorReply {
    match err {
        AppError::Api(api_error) => handle_api_error(api_error),
        other => handle_unexpected(other),
    }
}

/// Tier 1: classified failure.
pub fn handle_api_error(err: &ApiError) -> ErrorReply {
    let error_code = err.error_code();
    tracing::error!(
        error_code = error_code.error_code(),
        http_status = error_code.http_status_code(),
        error = %error_chain(err),
        "api exception"
    );

    ErrorReply {
        status: status_of(error_code),
        body: ErrorResponse::error_with_description(error_code, err.description()),
    }
}

/// Tier 2: anything not classified.
pub fn handle_unexpected(err: &(dyn StdError + 'static)) -> ErrorReply {
    tracing::error!(error = %error_chain(err), detail = ?err, "unhandled exception");
    server_error()
}

/// Tier 2 for a panic caught by the panic layer.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %message, "handler panicked");

    server_error().into_response()
}

fn server_error() -> ErrorReply {
    ErrorReply {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: ErrorResponse::error(&ErrorCode::ServerError),
    }
}

fn status_of(error_code: &dyn ErrorDescriptor) -> StatusCode {
    StatusCode::from_u16(error_code.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// "outer: inner: root" rendering of an error and its sources
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut current = err.source();
    while let Some(source) = current {
        rendered.push_str(": ");
        rendered.push_str(&source.to_string());
        current = source.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_code::UserErrorCode;
    use crate::response::ERROR_DESCRIPTION;

    #[test]
    fn test_every_catalog_kind_emits_its_status() {
        let entries: [&'static dyn ErrorDescriptor; 5] = [
            &ErrorCode::Ok,
            &ErrorCode::BadRequest,
            &ErrorCode::ServerError,
            &ErrorCode::NullPoint,
            &UserErrorCode::UserNotFound,
        ];
        for entry in entries {
            let reply = resolve(&AppError::Api(ApiError::new(entry)));
            assert_eq!(reply.status.as_u16(), entry.http_status_code());
            assert_eq!(reply.body.result.result_code, entry.error_code());
        }
    }

    #[test]
    fn test_bad_request_without_override_uses_catalog_description() {
        let reply = resolve(&AppError::Api(ApiError::new(&ErrorCode::BadRequest)));
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.body.result.result_description, "잘못된 요청");
    }

    #[test]
    fn test_bad_request_with_override() {
        let reply = resolve(&AppError::Api(ApiError::with_description(
            &ErrorCode::BadRequest,
            "email already exists",
        )));
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.body.result.result_description, "email already exists");
    }

    #[test]
    fn test_null_point_is_500_with_512_code() {
        let reply = resolve(&AppError::Api(ApiError::new(&ErrorCode::NullPoint)));
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply.body.result.result_code, 512);
    }

    #[test]
    fn test_unclassified_failure_is_generic_500() {
        let reply = resolve(&AppError::internal("connection refused by 10.0.0.3"));
        let wire = serde_json::to_string(&reply.body).unwrap();

        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply.body.result.result_code, ErrorCode::ServerError.error_code());
        assert_eq!(reply.body.result.result_description, ERROR_DESCRIPTION);
        assert!(!wire.contains("10.0.0.3"));
    }

    #[test]
    fn test_classified_source_never_leaks() {
        let reply = resolve(&AppError::Api(ApiError::with_source(
            &ErrorCode::BadRequest,
            "stack frame 0x7f",
        )));
        let wire = serde_json::to_string(&reply.body).unwrap();
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert!(!wire.contains("0x7f"));
    }

    #[test]
    fn test_panic_payloads_become_500() {
        let response = handle_panic(Box::new("index out of bounds"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(String::from("called `Option::unwrap()` on a `None` value")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(42_u8));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_chain_walks_sources() {
        let err = ApiError::with_source(&ErrorCode::ServerError, "pool timed out");
        assert_eq!(error_chain(&err), "[500] 서버 에러: 서버 에러: pool timed out");
    }

    #[tokio::test]
    async fn test_reply_renders_envelope() {
        let response = resolve(&AppError::user_not_found()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["result"]["result_code"], 1404);
        assert!(json.get("body").is_none());
    }
}
