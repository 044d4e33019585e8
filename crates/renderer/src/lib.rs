//! Image rendering for scene bands.
//!
//! - `composite`: natural color RGB composite with a robust stretch
//! - `ndvi`: vegetation index computation and color mapping
//! - `colormap`: piecewise-linear color ramps (viridis)
//! - `stretch`: percentile and min/max value ranges
//! - `png`: indexed and RGBA PNG encoding

pub mod colormap;
pub mod composite;
pub mod error;
pub mod ndvi;
pub mod png;
pub mod stretch;

pub use colormap::{Color, ColorMap, VIRIDIS};
pub use composite::{natural_color_rgba, render_natural_color};
pub use error::RenderError;
pub use ndvi::{compute_ndvi, render_ndvi};
