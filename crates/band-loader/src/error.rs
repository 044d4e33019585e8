//! Band loading errors.

use projection::ProjectionError;
use scene_common::ImageryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Scene {0} has no '{1}' asset")]
    MissingAsset(String, String),

    #[error("Scene {0} does not declare a projection")]
    MissingCrs(String),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error("GeoTIFF is missing georeferencing tags")]
    MissingGeoreference,

    #[error("Bounding box does not intersect band '{0}'")]
    EmptyWindow(String),

    #[error("Unsupported pixel layout: {0}")]
    UnsupportedLayout(String),

    #[error("TIFF decoding failed: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Band loading task failed: {0}")]
    Join(String),
}

impl From<LoadError> for ImageryError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Projection(e) => ImageryError::ProjectionError(e.to_string()),
            other => ImageryError::RasterLoadError(other.to_string()),
        }
    }
}
