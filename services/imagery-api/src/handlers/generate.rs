//! `GET /generate-images`

use std::sync::Arc;

use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use scene_common::time::DEFAULT_TIME_OF_INTEREST;
use scene_common::ImageryError;

use crate::metrics;
use crate::pipeline::generate_images;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateQuery {
    pub bbox: String,
    #[serde(default = "default_time_of_interest")]
    pub time_of_interest: String,
}

fn default_time_of_interest() -> String {
    DEFAULT_TIME_OF_INTEREST.to_string()
}

pub async fn generate_images_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<GenerateQuery>,
) -> Response {
    metrics::record_request();

    match generate_images(&state, &params.bbox, &params.time_of_interest).await {
        Ok(images) => Json(images).into_response(),
        Err(e) => error_response(e),
    }
}

/// Handled errors are reported with 200, faults with 500; both carry
/// `{"error": message}`.
fn error_response(err: ImageryError) -> Response {
    let kind = err.kind();
    metrics::record_error(kind);

    if err.is_handled() {
        info!(kind = kind.as_str(), error = %err, "Request rejected");
    } else {
        error!(kind = kind.as_str(), error = %err, "Image generation failed");
    }

    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
