//! Common types and utilities shared across the landsat-imagery crates.

pub mod bbox;
pub mod error;
pub mod grid;
pub mod time;

pub use bbox::{BboxParseError, BoundingBox};
pub use error::{ErrorKind, ImageryError, ImageryResult};
pub use grid::{BandRaster, BandSet};
pub use time::TimeRange;
