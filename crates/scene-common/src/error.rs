//! Error types for the imagery service.

use thiserror::Error;

use crate::bbox::BboxParseError;

/// Result type alias using ImageryError.
pub type ImageryResult<T> = Result<T, ImageryError>;

/// Primary error type for imagery generation.
#[derive(Debug, Error)]
pub enum ImageryError {
    // === Request Errors ===
    #[error("{0}")]
    InvalidBbox(#[from] BboxParseError),

    #[error("No data found for the given bounding box and time range.")]
    NoData,

    // === Upstream Errors ===
    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Asset signing failed: {0}")]
    SigningError(String),

    #[error("Failed to load bands: {0}")]
    RasterLoadError(String),

    #[error("Projection error: {0}")]
    ProjectionError(String),

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    RenderError(String),

    // === Storage Errors ===
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Coarse classification used for status codes and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedInput,
    NoData,
    Upstream,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedInput => "malformed_input",
            ErrorKind::NoData => "no_data",
            ErrorKind::Upstream => "upstream",
        }
    }
}

impl ImageryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImageryError::InvalidBbox(_) => ErrorKind::MalformedInput,
            ImageryError::NoData => ErrorKind::NoData,
            _ => ErrorKind::Upstream,
        }
    }

    /// Whether the error is answered with a structured payload rather than
    /// treated as a server fault.
    pub fn is_handled(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Upstream)
    }

    /// Get the HTTP status code for this error.
    ///
    /// Handled errors keep the 200 status clients of this endpoint rely on.
    pub fn http_status_code(&self) -> u16 {
        if self.is_handled() {
            200
        } else {
            500
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handled_errors_are_200() {
        let err: ImageryError = BboxParseError::WrongCount(3).into();
        assert_eq!(err.http_status_code(), 200);
        assert_eq!(ImageryError::NoData.http_status_code(), 200);
    }

    #[test]
    fn test_upstream_errors_are_500() {
        let err = ImageryError::CatalogError("connection refused".into());
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert_eq!(err.http_status_code(), 500);
    }

    #[test]
    fn test_messages_match_payloads() {
        let err: ImageryError = BboxParseError::InvalidNumber.into();
        assert_eq!(
            err.to_string(),
            "Bounding box values must be valid floats in the format 'x1,y1,x2,y2'."
        );
        assert_eq!(
            ImageryError::NoData.to_string(),
            "No data found for the given bounding box and time range."
        );
    }
}
