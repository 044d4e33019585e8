//! Natural color composites.

use rayon::prelude::*;
use tracing::debug;

use scene_common::{BandRaster, BandSet};

use crate::error::RenderError;
use crate::png;
use crate::stretch::{robust_range, StretchRange};

/// Stack three bands into RGBA using one shared robust stretch.
///
/// The 2nd-98th percentile range is taken over the finite values of all
/// three bands together. A pixel with any non-finite channel is transparent.
pub fn natural_color_rgba(
    red: &BandRaster,
    green: &BandRaster,
    blue: &BandRaster,
) -> Result<Vec<u8>, RenderError> {
    for (name, band) in [("green", green), ("blue", blue)] {
        if !red.same_shape(band) {
            return Err(RenderError::ShapeMismatch {
                band: name.to_string(),
                width: red.width,
                height: red.height,
                actual_width: band.width,
                actual_height: band.height,
            });
        }
    }
    if red.is_empty() {
        return Err(RenderError::EmptyRaster);
    }

    let all = red.data.iter().chain(&green.data).chain(&blue.data);
    let range = robust_range(all).unwrap_or(StretchRange {
        low: 0.0,
        high: 0.0,
    });
    debug!(low = range.low, high = range.high, "Natural color stretch");

    let to_byte = |v: f32| (range.normalize(v) * 255.0).round() as u8;

    let pixels = red
        .data
        .par_iter()
        .zip(green.data.par_iter())
        .zip(blue.data.par_iter())
        .flat_map_iter(|((&r, &g), &b)| {
            if r.is_finite() && g.is_finite() && b.is_finite() {
                [to_byte(r), to_byte(g), to_byte(b), 255]
            } else {
                [0, 0, 0, 0]
            }
        })
        .collect();
    Ok(pixels)
}

/// Encode the `red`, `green` and `blue` bands of `bands` as a PNG.
pub fn render_natural_color(bands: &BandSet) -> Result<Vec<u8>, RenderError> {
    let band = |name: &str| {
        bands
            .get(name)
            .ok_or_else(|| RenderError::MissingBand(name.to_string()))
    };
    let red = band("red")?;
    let pixels = natural_color_rgba(red, band("green")?, band("blue")?)?;
    png::encode_auto(&pixels, red.width, red.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stretch_shared_across_channels() {
        // 0..=100 spread over the three channels
        let red = BandRaster::new(2, 1, vec![0.0, 100.0]);
        let green = BandRaster::new(2, 1, vec![50.0, 50.0]);
        let blue = BandRaster::new(2, 1, vec![100.0, 0.0]);
        let pixels = natural_color_rgba(&red, &green, &blue).unwrap();

        // Extremes clip, the middle value sits at half intensity
        assert_eq!(&pixels[0..4], &[0, 128, 255, 255]);
        assert_eq!(&pixels[4..8], &[255, 128, 0, 255]);
    }

    #[test]
    fn test_non_finite_pixel_transparent() {
        let red = BandRaster::new(2, 1, vec![1.0, f32::NAN]);
        let green = BandRaster::new(2, 1, vec![2.0, 2.0]);
        let blue = BandRaster::new(2, 1, vec![3.0, 3.0]);
        let pixels = natural_color_rgba(&red, &green, &blue).unwrap();
        assert_eq!(pixels[3], 255);
        assert_eq!(&pixels[4..8], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_missing_band() {
        let mut bands = BandSet::new();
        bands.insert("red", BandRaster::filled(2, 2, 1.0));
        bands.insert("green", BandRaster::filled(2, 2, 1.0));
        let err = render_natural_color(&bands).unwrap_err();
        assert!(matches!(err, RenderError::MissingBand(ref b) if b == "blue"));
    }

    #[test]
    fn test_shape_mismatch() {
        let red = BandRaster::filled(2, 2, 1.0);
        let green = BandRaster::filled(2, 2, 1.0);
        let blue = BandRaster::filled(2, 3, 1.0);
        assert!(matches!(
            natural_color_rgba(&red, &green, &blue),
            Err(RenderError::ShapeMismatch { ref band, .. }) if band == "blue"
        ));
    }
}
