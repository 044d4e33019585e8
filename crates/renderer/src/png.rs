//! PNG encoding for RGBA image data.
//!
//! Two output layouts:
//! - **Indexed (color type 3)** when the image has at most 256 distinct
//!   RGBA values. NDVI maps built from a color ramp usually qualify.
//! - **RGBA (color type 6)** otherwise, which is the common case for natural
//!   color composites.
//!
//! `encode_auto` picks between them.

use std::collections::HashMap;
use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use rayon::prelude::*;

use crate::error::RenderError;

pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

/// Below this many pixels palette extraction stays on one thread
const PARALLEL_THRESHOLD: usize = 4096;

/// Palette entries plus one index byte per pixel.
type Palette = (Vec<[u8; 4]>, Vec<u8>);

/// Encode RGBA pixels, choosing indexed output when the colors fit.
pub fn encode_auto(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, RenderError> {
    check_len(pixels, width, height)?;
    match extract_palette(pixels) {
        Some((palette, indices)) => encode_indexed(&palette, &indices, width, height),
        None => encode_rgba(pixels, width, height),
    }
}

/// Encode RGBA pixels as color type 6.
pub fn encode_rgba(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, RenderError> {
    check_len(pixels, width, height)?;
    let mut png = Vec::with_capacity(pixels.len() / 2);
    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, b"IHDR", &header(width, height, 6));
    write_chunk(&mut png, b"IDAT", &deflate_scanlines(pixels, width * 4, height)?);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

/// Encode palette indices as color type 3.
///
/// A tRNS chunk is written only when some palette entry is not opaque.
pub fn encode_indexed(
    palette: &[[u8; 4]],
    indices: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, RenderError> {
    if indices.len() != width * height {
        return Err(RenderError::Encode(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} indices for a {}x{} image", indices.len(), width, height),
        )));
    }

    let mut png = Vec::with_capacity(indices.len() / 2);
    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, b"IHDR", &header(width, height, 3));

    let plte: Vec<u8> = palette.iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    if palette.iter().any(|c| c[3] < 255) {
        let trns: Vec<u8> = palette.iter().map(|c| c[3]).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    write_chunk(&mut png, b"IDAT", &deflate_scanlines(indices, width, height)?);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

fn check_len(pixels: &[u8], width: usize, height: usize) -> Result<(), RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyRaster);
    }
    if pixels.len() != width * height * 4 {
        return Err(RenderError::Encode(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} bytes for a {}x{} RGBA image", pixels.len(), width, height),
        )));
    }
    Ok(())
}

/// IHDR payload: 8-bit samples, no interlace.
fn header(width: usize, height: usize, color_type: u8) -> [u8; 13] {
    let mut ihdr = [0u8; 13];
    ihdr[0..4].copy_from_slice(&(width as u32).to_be_bytes());
    ihdr[4..8].copy_from_slice(&(height as u32).to_be_bytes());
    ihdr[8] = 8;
    ihdr[9] = color_type;
    ihdr
}

#[inline(always)]
fn pack(px: &[u8]) -> u32 {
    u32::from_le_bytes([px[0], px[1], px[2], px[3]])
}

/// Build a palette if the image has at most 256 distinct colors.
fn extract_palette(pixels: &[u8]) -> Option<Palette> {
    let packed: Vec<u32> = if pixels.len() / 4 >= PARALLEL_THRESHOLD {
        pixels.par_chunks_exact(4).map(pack).collect()
    } else {
        pixels.chunks_exact(4).map(pack).collect()
    };

    let mut lookup: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette = Vec::with_capacity(MAX_PALETTE_SIZE);
    for &color in &packed {
        if lookup.contains_key(&color) {
            continue;
        }
        if palette.len() == MAX_PALETTE_SIZE {
            return None;
        }
        lookup.insert(color, palette.len() as u8);
        palette.push(color.to_le_bytes());
    }

    let indices = if packed.len() >= PARALLEL_THRESHOLD {
        packed.par_iter().map(|c| lookup[c]).collect()
    } else {
        packed.iter().map(|c| lookup[c]).collect()
    };
    Some((palette, indices))
}

/// Prefix each scanline with filter type 0 and zlib-compress.
fn deflate_scanlines(data: &[u8], row_bytes: usize, height: usize) -> std::io::Result<Vec<u8>> {
    let mut raw = Vec::with_capacity(height * (row_bytes + 1));
    for row in data.chunks_exact(row_bytes).take(height) {
        raw.push(0);
        raw.extend_from_slice(row);
    }
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::fast());
    encoder.write_all(&raw)?;
    encoder.finish()
}

fn write_chunk(png: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(kind);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(kind);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}
