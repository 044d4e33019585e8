use scene_common::ImageryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Band '{0}' was not loaded")]
    MissingBand(String),

    #[error("Band '{band}' is {actual_width}x{actual_height}, expected {width}x{height}")]
    ShapeMismatch {
        band: String,
        width: usize,
        height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("Cannot render an empty raster")]
    EmptyRaster,

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] std::io::Error),
}

impl From<RenderError> for ImageryError {
    fn from(err: RenderError) -> Self {
        ImageryError::RenderError(err.to_string())
    }
}
