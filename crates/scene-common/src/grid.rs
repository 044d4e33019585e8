//! In-memory band rasters.

use std::collections::HashMap;

/// A single spectral band as a row-major 2-D grid.
#[derive(Debug, Clone, PartialEq)]
pub struct BandRaster {
    pub width: usize,
    pub height: usize,
    /// Row-major values, `width * height` long.
    pub data: Vec<f32>,
}

impl BandRaster {
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// A raster filled with a single value.
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self::new(width, height, vec![value; width * height])
    }

    pub fn get(&self, col: usize, row: usize) -> Option<f32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.data.get(row * self.width + col).copied()
    }

    pub fn same_shape(&self, other: &BandRaster) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Bands of one scene keyed by band name (`red`, `nir08`, ...).
#[derive(Debug, Clone, Default)]
pub struct BandSet {
    bands: HashMap<String, BandRaster>,
}

impl BandSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, raster: BandRaster) {
        self.bands.insert(name.into(), raster);
    }

    pub fn get(&self, name: &str) -> Option<&BandRaster> {
        self.bands.get(name)
    }

    /// Band names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

impl FromIterator<(String, BandRaster)> for BandSet {
    fn from_iter<I: IntoIterator<Item = (String, BandRaster)>>(iter: I) -> Self {
        Self {
            bands: iter.into_iter().collect(),
        }
    }
}
