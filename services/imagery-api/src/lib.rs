//! Landsat imagery service library.
//!
//! Given a bounding box and time range, finds the least cloudy Landsat
//! Collection 2 Level-2 scene, loads its bands cropped to the box and writes
//! a natural color composite and an NDVI map as PNGs.

pub mod cleanup;
pub mod config;
pub mod handlers;
pub mod metrics;
pub mod pipeline;
pub mod state;
pub mod store;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use state::AppState;

/// All routes with state attached. Middleware layers are added by the binary.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/generate-images", get(handlers::generate_images_handler))
        .route(
            "/download-image/:image_path",
            get(handlers::download_image_handler),
        )
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(Extension(state))
}
