//! Test data generators for synthetic scene bands and GeoTIFFs.
//!
//! These generators create predictable, verifiable band patterns that can be
//! used across the test suite.

use std::io::Cursor;

use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;

/// Creates band values from a function of `(col, row)`.
///
/// # Returns
///
/// A `Vec<f32>` in row-major order (row 0 first, then row 1, etc.)
///
/// # Example
///
/// ```
/// use test_utils::create_band_values;
///
/// let band = create_band_values(3, 2, |col, row| (col * 10 + row) as f32);
/// assert_eq!(band, vec![0.0, 10.0, 20.0, 1.0, 11.0, 21.0]);
/// ```
pub fn create_band_values<F>(width: usize, height: usize, f: F) -> Vec<f32>
where
    F: Fn(usize, usize) -> f32,
{
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push(f(col, row));
        }
    }
    data
}

/// Creates a band with surface-reflectance-like digital numbers.
///
/// Landsat Collection 2 Level-2 bands store reflectance as `u16` with a
/// scale of 2.75e-5 and offset -0.2, so typical land values fall between
/// roughly 7,500 and 25,000.
pub fn create_reflectance_band(width: usize, height: usize, base: f32) -> Vec<f32> {
    create_band_values(width, height, |col, row| {
        let x_factor = col as f32 / width.max(1) as f32;
        let y_factor = row as f32 / height.max(1) as f32;
        base + x_factor * 4000.0 + y_factor * 2000.0
    })
}

/// Creates matching `(red, nir)` bands for a scene whose left half is
/// vegetated (high NIR, low red) and right half is bare soil.
pub fn create_vegetation_scene(width: usize, height: usize) -> (Vec<f32>, Vec<f32>) {
    let red = create_band_values(width, height, |col, _| {
        if col < width / 2 {
            8_000.0
        } else {
            14_000.0
        }
    });
    let nir = create_band_values(width, height, |col, _| {
        if col < width / 2 {
            24_000.0
        } else {
            15_000.0
        }
    });
    (red, nir)
}

/// Writes a single-band `u16` GeoTIFF into memory.
///
/// The file carries ModelPixelScale and ModelTiepoint tags placing the
/// upper-left pixel corner at `origin` with square pixels of `pixel_size`.
pub fn write_test_geotiff(
    width: u32,
    height: u32,
    data: &[u16],
    origin: (f64, f64),
    pixel_size: f64,
    rows_per_strip: u32,
) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut encoder = TiffEncoder::new(&mut buffer).expect("create TIFF encoder");
        let mut image = encoder
            .new_image::<colortype::Gray16>(width, height)
            .expect("create TIFF image");
        image
            .rows_per_strip(rows_per_strip)
            .expect("set rows per strip");
        image
            .encoder()
            .write_tag(Tag::ModelPixelScaleTag, &[pixel_size, pixel_size, 0.0][..])
            .expect("write pixel scale");
        image
            .encoder()
            .write_tag(
                Tag::ModelTiepointTag,
                &[0.0, 0.0, 0.0, origin.0, origin.1, 0.0][..],
            )
            .expect("write tiepoint");
        image.write_data(data).expect("write TIFF data");
    }
    buffer.into_inner()
}

const TIFF_SHORT: u16 = 3;
const TIFF_LONG: u16 = 4;
const TIFF_DOUBLE: u16 = 12;

/// Writes a tiled single-band `u16` GeoTIFF into memory.
///
/// The encoder only writes strips, so the IFD is assembled by hand. Tiles
/// are `tile_size` square and stored uncompressed in row-major tile order;
/// edge tiles are zero-padded to the full tile size as TIFF requires.
pub fn write_tiled_test_geotiff(
    width: u32,
    height: u32,
    data: &[u16],
    origin: (f64, f64),
    pixel_size: f64,
    tile_size: u32,
) -> Vec<u8> {
    assert_eq!(data.len(), (width * height) as usize, "data must be width * height");

    let tiles_across = width.div_ceil(tile_size);
    let tiles_down = height.div_ceil(tile_size);
    let tile_bytes = tile_size * tile_size * 2;

    // Header, IFD offset patched at the end
    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(b"II");
    out.extend_from_slice(&42u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    let mut tile_offsets = Vec::new();
    for tile_row in 0..tiles_down {
        for tile_col in 0..tiles_across {
            tile_offsets.push(out.len() as u32);
            for y in 0..tile_size {
                for x in 0..tile_size {
                    let col = tile_col * tile_size + x;
                    let row = tile_row * tile_size + y;
                    let value = if col < width && row < height {
                        data[(row * width + col) as usize]
                    } else {
                        0
                    };
                    out.extend_from_slice(&value.to_le_bytes());
                }
            }
        }
    }
    let tile_count = tile_offsets.len() as u32;

    let byte_counts = vec![tile_bytes; tile_offsets.len()];
    // Single-value arrays live inline in the entry
    let (offsets_value, counts_value) = if tile_count == 1 {
        (tile_offsets[0], tile_bytes)
    } else {
        (
            push_longs(&mut out, &tile_offsets),
            push_longs(&mut out, &byte_counts),
        )
    };

    let scale_offset = push_doubles(&mut out, &[pixel_size, pixel_size, 0.0]);
    let tiepoint_offset = push_doubles(&mut out, &[0.0, 0.0, 0.0, origin.0, origin.1, 0.0]);

    // Entries must be sorted by tag
    let entries: [(u16, u16, u32, u32); 14] = [
        (256, TIFF_LONG, 1, width),
        (257, TIFF_LONG, 1, height),
        (258, TIFF_SHORT, 1, 16),
        (259, TIFF_SHORT, 1, 1),
        (262, TIFF_SHORT, 1, 1),
        (277, TIFF_SHORT, 1, 1),
        (284, TIFF_SHORT, 1, 1),
        (322, TIFF_LONG, 1, tile_size),
        (323, TIFF_LONG, 1, tile_size),
        (324, TIFF_LONG, tile_count, offsets_value),
        (325, TIFF_LONG, tile_count, counts_value),
        (339, TIFF_SHORT, 1, 1),
        (33550, TIFF_DOUBLE, 3, scale_offset),
        (33922, TIFF_DOUBLE, 6, tiepoint_offset),
    ];

    let ifd_offset = out.len() as u32;
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for (tag, field_type, count, value) in entries {
        out.extend_from_slice(&tag.to_le_bytes());
        out.extend_from_slice(&field_type.to_le_bytes());
        out.extend_from_slice(&count.to_le_bytes());
        // Little-endian, so an inline SHORT occupies the first two bytes
        out.extend_from_slice(&value.to_le_bytes());
    }
    out.extend_from_slice(&0u32.to_le_bytes());

    out[4..8].copy_from_slice(&ifd_offset.to_le_bytes());
    out
}

fn push_longs(out: &mut Vec<u8>, values: &[u32]) -> u32 {
    let offset = out.len() as u32;
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
    offset
}

fn push_doubles(out: &mut Vec<u8>, values: &[f64]) -> u32 {
    let offset = out.len() as u32;
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
    offset
}
