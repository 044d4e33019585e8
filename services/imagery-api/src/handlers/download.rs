//! `GET /download-image/:image_path`

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Extension, Path};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tokio_util::io::ReaderStream;
use tracing::{debug, error};

use crate::state::AppState;
use crate::store::StoreError;

/// Stream a stored PNG back to the client.
pub async fn download_image_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(image_path): Path<String>,
) -> Response {
    match state.store.open(&image_path).await {
        Ok(file) => (
            [(header::CONTENT_TYPE, "image/png")],
            Body::from_stream(ReaderStream::new(file)),
        )
            .into_response(),
        Err(e @ (StoreError::NotFound(_) | StoreError::InvalidName(_))) => {
            debug!(image = %image_path, error = %e, "Image not available");
            (StatusCode::NOT_FOUND, Json(json!({ "error": "Image not found" }))).into_response()
        }
        Err(e) => {
            error!(image = %image_path, error = %e, "Failed to open image");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
