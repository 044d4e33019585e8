//! HTTP request handlers.

pub mod download;
pub mod generate;
pub mod health;

pub use download::download_image_handler;
pub use generate::generate_images_handler;
pub use health::{health_handler, metrics_handler};
