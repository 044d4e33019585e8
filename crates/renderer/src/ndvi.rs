//! Normalized Difference Vegetation Index.

use rayon::prelude::*;
use tracing::debug;

use scene_common::BandRaster;

use crate::colormap::{ColorMap, VIRIDIS};
use crate::error::RenderError;
use crate::png;
use crate::stretch::finite_min_max;

/// Per-pixel `(nir - red) / (nir + red)`.
///
/// Arithmetic is done in `f64`. A zero denominator yields NaN, which is kept
/// in the output rather than clamped.
pub fn compute_ndvi(red: &BandRaster, nir: &BandRaster) -> Result<BandRaster, RenderError> {
    if !red.same_shape(nir) {
        return Err(RenderError::ShapeMismatch {
            band: "nir08".to_string(),
            width: red.width,
            height: red.height,
            actual_width: nir.width,
            actual_height: nir.height,
        });
    }

    let data: Vec<f32> = red
        .data
        .par_iter()
        .zip(nir.data.par_iter())
        .map(|(&r, &n)| ndvi_pixel(r as f64, n as f64) as f32)
        .collect();

    Ok(BandRaster::new(red.width, red.height, data))
}

#[inline]
fn ndvi_pixel(red: f64, nir: f64) -> f64 {
    let denominator = nir + red;
    if denominator == 0.0 {
        return f64::NAN;
    }
    (nir - red) / denominator
}

/// Color an NDVI grid with `colormap`, scaled to its finite min/max.
///
/// NaN pixels are transparent. Returns RGBA bytes.
pub fn colorize(ndvi: &BandRaster, colormap: &ColorMap) -> Vec<u8> {
    let Some(range) = finite_min_max(&ndvi.data) else {
        debug!("NDVI grid has no finite values");
        return vec![0; ndvi.data.len() * 4];
    };

    ndvi.data
        .par_iter()
        .flat_map_iter(|&v| colormap.sample(range.normalize(v)).to_rgba())
        .collect()
}

/// Compute NDVI from `red` and `nir` and encode it as a viridis PNG.
pub fn render_ndvi(red: &BandRaster, nir: &BandRaster) -> Result<Vec<u8>, RenderError> {
    let ndvi = compute_ndvi(red, nir)?;
    if ndvi.is_empty() {
        return Err(RenderError::EmptyRaster);
    }
    let pixels = colorize(&ndvi, &VIRIDIS);
    png::encode_auto(&pixels, ndvi.width, ndvi.height)
}
