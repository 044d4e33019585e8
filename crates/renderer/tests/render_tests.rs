//! Rendered PNGs decoded back with the `image` crate.

use image::GenericImageView;

use renderer::png::{encode_auto, encode_indexed, encode_rgba, PNG_SIGNATURE};
use renderer::{render_natural_color, render_ndvi, VIRIDIS};
use scene_common::{BandRaster, BandSet};
use test_utils::{create_reflectance_band, create_vegetation_scene};

fn scene_bands(width: usize, height: usize) -> BandSet {
    let mut bands = BandSet::new();
    bands.insert("red", BandRaster::new(width, height, create_reflectance_band(width, height, 8_000.0)));
    bands.insert("green", BandRaster::new(width, height, create_reflectance_band(width, height, 9_000.0)));
    bands.insert("blue", BandRaster::new(width, height, create_reflectance_band(width, height, 7_500.0)));
    bands
}

// ============================================================================
// PNG encoding
// ============================================================================

#[test]
fn test_rgba_png_decodes() {
    let pixels: Vec<u8> = (0..6u8).flat_map(|i| [i * 40, 255 - i * 40, 7, 255]).collect();
    let png = encode_rgba(&pixels, 3, 2).unwrap();
    assert_eq!(&png[0..8], &PNG_SIGNATURE);

    let img = image::load_from_memory(&png).unwrap();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(1, 1).0, [160, 95, 7, 255]);
}

#[test]
fn test_indexed_png_keeps_transparency() {
    let palette = [[10, 20, 30, 255], [0, 0, 0, 0]];
    let png = encode_indexed(&palette, &[0, 1, 1, 0], 2, 2).unwrap();

    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);
    assert_eq!(img.get_pixel(1, 0).0[3], 0);
}

#[test]
fn test_auto_prefers_indexed_for_few_colors() {
    let pixels: Vec<u8> = (0..64 * 64)
        .flat_map(|i: usize| if i % 2 == 0 { [255, 0, 0, 255] } else { [0, 0, 255, 255] })
        .collect();
    let auto = encode_auto(&pixels, 64, 64).unwrap();
    let rgba = encode_rgba(&pixels, 64, 64).unwrap();
    assert!(auto.len() < rgba.len());

    // Same image either way
    let a = image::load_from_memory(&auto).unwrap().to_rgba8();
    let b = image::load_from_memory(&rgba).unwrap().to_rgba8();
    assert_eq!(a.as_raw(), b.as_raw());
}

// ============================================================================
// Natural color
// ============================================================================

#[test]
fn test_natural_color_png() {
    let png = render_natural_color(&scene_bands(40, 30)).unwrap();
    assert_eq!(&png[0..4], &[0x89, 0x50, 0x4E, 0x47]);

    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (40, 30));

    // Reflectance grows to the right and downwards, so the stretched
    // top-left is dark and the bottom-right bright
    let dark = img.get_pixel(0, 0).0;
    let bright = img.get_pixel(39, 29).0;
    assert!(dark[0] < bright[0]);
    assert_eq!(bright[3], 255);
}

#[test]
fn test_natural_color_nodata_transparent() {
    let mut bands = scene_bands(4, 4);
    let mut red = bands.get("red").unwrap().clone();
    red.data[5] = f32::NAN;
    bands.insert("red", red);

    let img = image::load_from_memory(&render_natural_color(&bands).unwrap())
        .unwrap()
        .to_rgba8();
    assert_eq!(img.get_pixel(1, 1).0[3], 0);
    assert_eq!(img.get_pixel(0, 0).0[3], 255);
}

// ============================================================================
// NDVI
// ============================================================================

#[test]
fn test_ndvi_png_uses_viridis_extremes() {
    let (red, nir) = create_vegetation_scene(16, 8);
    let red = BandRaster::new(16, 8, red);
    let nir = BandRaster::new(16, 8, nir);

    let img = image::load_from_memory(&render_ndvi(&red, &nir).unwrap())
        .unwrap()
        .to_rgba8();
    assert_eq!(img.dimensions(), (16, 8));

    // Vegetated left half holds the maximum, bare right half the minimum
    assert_eq!(img.get_pixel(0, 0).0, VIRIDIS.sample(1.0).to_rgba());
    assert_eq!(img.get_pixel(15, 7).0, VIRIDIS.sample(0.0).to_rgba());
}

#[test]
fn test_ndvi_png_zero_denominator_transparent() {
    let red = BandRaster::new(2, 2, vec![0.0, 8_000.0, 14_000.0, 8_000.0]);
    let nir = BandRaster::new(2, 2, vec![0.0, 24_000.0, 15_000.0, 24_000.0]);

    let img = image::load_from_memory(&render_ndvi(&red, &nir).unwrap())
        .unwrap()
        .to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0[3], 0);
    assert_eq!(img.get_pixel(1, 0).0[3], 255);
}
