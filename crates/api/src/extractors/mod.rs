//! Request extractors whose rejections go through the exception handler.

mod path;
mod validated_json;

pub use path::ApiPath;
pub use validated_json::ValidatedJson;
