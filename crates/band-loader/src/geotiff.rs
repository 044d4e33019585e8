//! Windowed reads from single-band GeoTIFFs.

use std::io::{Read, Seek};

use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tiff::ColorType;
use tracing::debug;

use scene_common::BandRaster;

use crate::error::LoadError;

/// Affine placement of a north-up raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    /// X of the upper-left corner of pixel (0, 0)
    pub origin_x: f64,
    /// Y of the upper-left corner of pixel (0, 0)
    pub origin_y: f64,
    pub pixel_width: f64,
    /// Positive; rows run towards decreasing y
    pub pixel_height: f64,
}

/// A rectangle of pixels, half-open on the right and bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWindow {
    pub col_off: usize,
    pub row_off: usize,
    pub width: usize,
    pub height: usize,
}

impl PixelWindow {
    pub fn col_end(&self) -> usize {
        self.col_off + self.width
    }

    pub fn row_end(&self) -> usize {
        self.row_off + self.height
    }
}

impl GeoTransform {
    /// Build from ModelPixelScale `[sx, sy, sz]` and ModelTiepoint
    /// `[i, j, k, x, y, z]` tag values.
    pub fn from_tags(scale: &[f64], tiepoint: &[f64]) -> Option<Self> {
        if scale.len() < 2 || tiepoint.len() < 6 || scale[0] <= 0.0 || scale[1] <= 0.0 {
            return None;
        }
        let (i, j, x, y) = (tiepoint[0], tiepoint[1], tiepoint[3], tiepoint[4]);
        Some(Self {
            origin_x: x - i * scale[0],
            origin_y: y + j * scale[1],
            pixel_width: scale[0],
            pixel_height: scale[1],
        })
    }

    /// Pixels covering `(min_x, min_y, max_x, max_y)`, clipped to the image.
    ///
    /// Partially covered edge pixels are included. Returns `None` if the
    /// envelope misses the image.
    pub fn window(
        &self,
        envelope: (f64, f64, f64, f64),
        image_width: u32,
        image_height: u32,
    ) -> Option<PixelWindow> {
        let (min_x, min_y, max_x, max_y) = envelope;
        let clamp = |v: f64, max: u32| v.max(0.0).min(max as f64) as usize;

        let col_min = clamp(((min_x - self.origin_x) / self.pixel_width).floor(), image_width);
        let col_max = clamp(((max_x - self.origin_x) / self.pixel_width).ceil(), image_width);
        let row_min = clamp(((self.origin_y - max_y) / self.pixel_height).floor(), image_height);
        let row_max = clamp(((self.origin_y - min_y) / self.pixel_height).ceil(), image_height);

        if col_max <= col_min || row_max <= row_min {
            return None;
        }
        Some(PixelWindow {
            col_off: col_min,
            row_off: row_min,
            width: col_max - col_min,
            height: row_max - row_min,
        })
    }
}

/// Read the pixels of a GeoTIFF covering `envelope` (in the file's CRS).
///
/// `band` only labels errors.
pub fn read_window<R: Read + Seek>(
    reader: R,
    envelope: (f64, f64, f64, f64),
    band: &str,
) -> Result<BandRaster, LoadError> {
    let mut decoder = Decoder::new(reader)?;

    match decoder.colortype()? {
        ColorType::Gray(_) => {}
        other => {
            return Err(LoadError::UnsupportedLayout(format!(
                "band '{}' has color type {:?}, expected a single channel",
                band, other
            )))
        }
    }

    let (width, height) = decoder.dimensions()?;
    let scale = decoder
        .get_tag_f64_vec(Tag::ModelPixelScaleTag)
        .map_err(|_| LoadError::MissingGeoreference)?;
    let tiepoint = decoder
        .get_tag_f64_vec(Tag::ModelTiepointTag)
        .map_err(|_| LoadError::MissingGeoreference)?;
    let transform = GeoTransform::from_tags(&scale, &tiepoint).ok_or(LoadError::MissingGeoreference)?;

    let window = transform
        .window(envelope, width, height)
        .ok_or_else(|| LoadError::EmptyWindow(band.to_string()))?;
    debug!(band = %band, ?window, image_width = width, image_height = height, "Reading window");

    read_pixels(&mut decoder, width, window)
}

/// Copy the window out of every chunk (tile or strip) it touches.
fn read_pixels<R: Read + Seek>(
    decoder: &mut Decoder<R>,
    image_width: u32,
    window: PixelWindow,
) -> Result<BandRaster, LoadError> {
    let (chunk_w, chunk_h) = decoder.chunk_dimensions();
    let (chunk_w, chunk_h) = (chunk_w as usize, chunk_h as usize);
    if chunk_w == 0 || chunk_h == 0 {
        return Err(LoadError::UnsupportedLayout("zero-sized chunks".to_string()));
    }
    let chunks_across = (image_width as usize).div_ceil(chunk_w);

    let mut out = vec![0.0f32; window.width * window.height];

    let first_chunk_row = window.row_off / chunk_h;
    let last_chunk_row = (window.row_end() - 1) / chunk_h;
    let first_chunk_col = window.col_off / chunk_w;
    let last_chunk_col = (window.col_end() - 1) / chunk_w;

    for chunk_row in first_chunk_row..=last_chunk_row {
        for chunk_col in first_chunk_col..=last_chunk_col {
            let index = (chunk_row * chunks_across + chunk_col) as u32;
            let (data_w, data_h) = decoder.chunk_data_dimensions(index);
            let (data_w, data_h) = (data_w as usize, data_h as usize);
            let values = to_f32(decoder.read_chunk(index)?)?;

            // Edge tiles may come back padded to the full tile size
            let stride = if values.len() == chunk_w * chunk_h {
                chunk_w
            } else {
                data_w
            };

            let x0 = chunk_col * chunk_w;
            let y0 = chunk_row * chunk_h;
            let x_start = x0.max(window.col_off);
            let x_end = (x0 + data_w).min(window.col_end());
            let y_start = y0.max(window.row_off);
            let y_end = (y0 + data_h).min(window.row_end());

            for y in y_start..y_end {
                let src_row = (y - y0) * stride;
                let dst_row = (y - window.row_off) * window.width;
                for x in x_start..x_end {
                    if let Some(v) = values.get(src_row + (x - x0)) {
                        out[dst_row + (x - window.col_off)] = *v;
                    }
                }
            }
        }
    }

    Ok(BandRaster::new(window.width, window.height, out))
}

fn to_f32(result: DecodingResult) -> Result<Vec<f32>, LoadError> {
    let values = match result {
        DecodingResult::U8(data) => data.into_iter().map(f32::from).collect(),
        DecodingResult::U16(data) => data.into_iter().map(f32::from).collect(),
        DecodingResult::U32(data) => data.into_iter().map(|v| v as f32).collect(),
        DecodingResult::I8(data) => data.into_iter().map(f32::from).collect(),
        DecodingResult::I16(data) => data.into_iter().map(f32::from).collect(),
        DecodingResult::I32(data) => data.into_iter().map(|v| v as f32).collect(),
        DecodingResult::F32(data) => data,
        DecodingResult::F64(data) => data.into_iter().map(|v| v as f32).collect(),
        _ => {
            return Err(LoadError::UnsupportedLayout(
                "sample format cannot be converted to f32".to_string(),
            ))
        }
    };
    Ok(values)
}
