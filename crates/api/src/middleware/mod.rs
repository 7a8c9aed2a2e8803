//! HTTP middleware.

mod logger;

pub use logger::{logger_middleware, MAX_REQUEST_BODY_BYTES};
