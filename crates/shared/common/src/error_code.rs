//! Error catalog.
//!
//! Every classifiable failure references one of these entries. A catalog
//! entry is a fixed triple of HTTP status, API error code and description.
//! The API error code is what clients branch on; it is unique across all
//! catalogs and distinct from the HTTP status where needed (`NullPoint`
//! shares HTTP 500 with `ServerError` but reports 512).

use std::fmt;

/// Read-only view of a catalog entry.
pub trait ErrorDescriptor: fmt::Debug + Send + Sync {
    /// HTTP status to emit
    fn http_status_code(&self) -> u16;

    /// Stable API error code reported as `result_code`
    fn error_code(&self) -> i32;

    /// Fixed human-readable description reported as `result_message`
    fn description(&self) -> &'static str;
}

/// Common error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Ok,
    BadRequest,
    ServerError,
    /// Reserved for an explicit missing-value check. Nothing raises it yet.
    NullPoint,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 4] = [
        ErrorCode::Ok,
        ErrorCode::BadRequest,
        ErrorCode::ServerError,
        ErrorCode::NullPoint,
    ];

    /// Catalog name as exposed in logs
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::Ok => "OK",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::ServerError => "SERVER_ERROR",
            ErrorCode::NullPoint => "NULL_POINT",
        }
    }
}

impl ErrorDescriptor for ErrorCode {
    fn http_status_code(&self) -> u16 {
        match self {
            ErrorCode::Ok => 200,
            ErrorCode::BadRequest => 400,
            ErrorCode::ServerError | ErrorCode::NullPoint => 500,
        }
    }

    fn error_code(&self) -> i32 {
        match self {
            ErrorCode::Ok => 200,
            ErrorCode::BadRequest => 400,
            ErrorCode::ServerError => 500,
            ErrorCode::NullPoint => 512,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ErrorCode::Ok => "성공",
            ErrorCode::BadRequest => "잘못된 요청",
            ErrorCode::ServerError => "서버 에러",
            ErrorCode::NullPoint => "Null Point",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// User domain error kinds. Codes live in the 1000 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserErrorCode {
    UserNotFound,
}

impl UserErrorCode {
    pub const ALL: [UserErrorCode; 1] = [UserErrorCode::UserNotFound];

    pub fn name(&self) -> &'static str {
        match self {
            UserErrorCode::UserNotFound => "USER_NOT_FOUND",
        }
    }
}

impl ErrorDescriptor for UserErrorCode {
    fn http_status_code(&self) -> u16 {
        match self {
            UserErrorCode::UserNotFound => 404,
        }
    }

    fn error_code(&self) -> i32 {
        match self {
            UserErrorCode::UserNotFound => 1404,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            UserErrorCode::UserNotFound => "사용자를 찾을 수 없음",
        }
    }
}

impl fmt::Display for UserErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
