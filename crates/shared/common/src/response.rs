//! Response envelope shared by every endpoint.
//!
//! ```json
//! { "result": { "result_code": 200, "result_message": "성공", "result_description": "성공" },
//!   "body": { ... } }
//! ```
//!
//! Error envelopes carry no `body` key.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error_code::{ErrorCode, ErrorDescriptor};

/// Description attached to every successful result
pub const SUCCESS_DESCRIPTION: &str = "성공";

/// Description attached to an error result without an override
pub const ERROR_DESCRIPTION: &str = "에러 발생";

/// Status metadata of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultInfo {
    pub result_code: i32,
    pub result_message: String,
    pub result_description: String,
}

impl ResultInfo {
    pub fn ok() -> Self {
        Self {
            result_code: ErrorCode::Ok.error_code(),
            result_message: ErrorCode::Ok.description().to_string(),
            result_description: SUCCESS_DESCRIPTION.to_string(),
        }
    }

    pub fn error(error_code: &dyn ErrorDescriptor) -> Self {
        Self::error_with_description(error_code, ERROR_DESCRIPTION)
    }

    pub fn error_with_description(
        error_code: &dyn ErrorDescriptor,
        description: impl Into<String>,
    ) -> Self {
        Self {
            result_code: error_code.error_code(),
            result_message: error_code.description().to_string(),
            result_description: description.into(),
        }
    }

    /// The cause is for server-side diagnostics only and is dropped here.
    pub fn error_with_source(
        error_code: &dyn ErrorDescriptor,
        _source: &(dyn std::error::Error + 'static),
    ) -> Self {
        Self::error(error_code)
    }

    pub fn is_ok(&self) -> bool {
        self.result_code == ErrorCode::Ok.error_code()
    }
}

/// Uniform response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub result: ResultInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<T>,
}

/// Envelope used for failures; it never has a body.
pub type ErrorResponse = ApiResponse<()>;

impl<T> ApiResponse<T> {
    pub fn success(body: T) -> Self {
        Self {
            result: ResultInfo::ok(),
            body: Some(body),
        }
    }
}

impl ErrorResponse {
    pub fn from_result(result: ResultInfo) -> Self {
        Self { result, body: None }
    }

    pub fn error(error_code: &dyn ErrorDescriptor) -> Self {
        Self::from_result(ResultInfo::error(error_code))
    }

    pub fn error_with_description(
        error_code: &dyn ErrorDescriptor,
        description: impl Into<String>,
    ) -> Self {
        Self::from_result(ResultInfo::error_with_description(error_code, description))
    }

    pub fn error_with_source(
        error_code: &dyn ErrorDescriptor,
        source: &(dyn std::error::Error + 'static),
    ) -> Self {
        Self::from_result(ResultInfo::error_with_source(error_code, source))
    }
}

/// Successful envelopes are always HTTP 200. Failures go through the
/// exception handler, which picks the status from the catalog.
impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
