//! Common building blocks shared by the delivery services.
//!
//! This crate provides:
//! - The error catalog and the classified `ApiError`
//! - The `ApiResponse` envelope returned by every endpoint
//! - The exception handler mapping failures to envelopes and HTTP statuses
//! - Configuration structures

pub mod config;
pub mod error;
pub mod error_code;
pub mod exception;
pub mod handler;
pub mod response;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use error_code::{ErrorCode, ErrorDescriptor, UserErrorCode};
pub use exception::{ApiError, BoxError};
pub use handler::{handle_panic, ErrorReply};
pub use response::{ApiResponse, ErrorResponse, ResultInfo};
