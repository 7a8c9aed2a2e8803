//! Classified failure raised by business logic.

use std::error::Error as StdError;
use std::fmt;

use crate::error_code::ErrorDescriptor;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A failure tagged with a catalog entry.
///
/// `description` is what clients see as `result_description`; it defaults to
/// the catalog description. The optional source is only ever logged.
#[derive(Debug)]
pub struct ApiError {
    error_code: &'static dyn ErrorDescriptor,
    description: String,
    source: Option<BoxError>,
}

impl ApiError {
    pub fn new(error_code: &'static dyn ErrorDescriptor) -> Self {
        Self {
            error_code,
            description: error_code.description().to_string(),
            source: None,
        }
    }

    pub fn with_description(
        error_code: &'static dyn ErrorDescriptor,
        description: impl Into<String>,
    ) -> Self {
        Self {
            error_code,
            description: description.into(),
            source: None,
        }
    }

    pub fn with_source(
        error_code: &'static dyn ErrorDescriptor,
        source: impl Into<BoxError>,
    ) -> Self {
        Self {
            error_code,
            description: error_code.description().to_string(),
            source: Some(source.into()),
        }
    }

    pub fn with_source_and_description(
        error_code: &'static dyn ErrorDescriptor,
        source: impl Into<BoxError>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            error_code,
            description: description.into(),
            source: Some(source.into()),
        }
    }

    pub fn error_code(&self) -> &'static dyn ErrorDescriptor {
        self.error_code
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.error_code.error_code(),
            self.error_code.description(),
            self.description
        )
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn StdError + 'static))
    }
}
