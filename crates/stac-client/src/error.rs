//! Catalog error types.

use scene_common::ImageryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid catalog response: {0}")]
    Decode(String),

    #[error("Failed to sign assets: {0}")]
    Signing(String),
}

impl From<CatalogError> for ImageryError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Signing(msg) => ImageryError::SigningError(msg),
            other => ImageryError::CatalogError(other.to_string()),
        }
    }
}
