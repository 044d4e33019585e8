//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in lon/lat degrees.
///
/// No ordering is enforced between the min and max corners; callers are
/// responsible for passing a sensible box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Parse a query string of the form `"x1,y1,x2,y2"`.
    ///
    /// Every token is parsed before the count is checked, so a string with
    /// both a bad token and the wrong length reports the bad token.
    pub fn from_query_string(s: &str) -> Result<Self, BboxParseError> {
        let values = s
            .split(',')
            .map(|token| token.trim().parse::<f64>())
            .collect::<Result<Vec<f64>, _>>()
            .map_err(|_| BboxParseError::InvalidNumber)?;

        match values.as_slice() {
            [min_x, min_y, max_x, max_y] => Ok(Self::new(*min_x, *min_y, *max_x, *max_y)),
            _ => Err(BboxParseError::WrongCount(values.len())),
        }
    }

    /// Corner values in `[min_x, min_y, max_x, max_y]` order, as STAC expects.
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Points along the box outline, `per_edge` samples per side.
    ///
    /// Used to project the box into another CRS without losing the bulge of
    /// curved edges.
    pub fn densify(&self, per_edge: usize) -> Vec<(f64, f64)> {
        let steps = per_edge.max(1);
        let mut points = Vec::with_capacity(steps * 4);
        for i in 0..steps {
            let t = i as f64 / steps as f64;
            let x = self.min_x + self.width() * t;
            let y = self.min_y + self.height() * t;
            points.push((x, self.min_y));
            points.push((self.max_x, y));
            points.push((self.max_x - self.width() * t, self.max_y));
            points.push((self.min_x, self.max_y - self.height() * t));
        }
        points
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BboxParseError {
    #[error("Bounding box must contain exactly 4 values (x1, y1, x2, y2).")]
    WrongCount(usize),

    #[error("Bounding box values must be valid floats in the format 'x1,y1,x2,y2'.")]
    InvalidNumber,
}
