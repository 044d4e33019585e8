//! Band loading for selected scenes.
//!
//! Scene bands are Cloud-Optimized GeoTIFFs. Only the tiles (or strips)
//! intersecting the requested bounding box are fetched, through HTTP range
//! requests, and decoded into `f32` grids.

pub mod error;
pub mod geotiff;
pub mod loader;
pub mod range_reader;

pub use error::LoadError;
pub use geotiff::{read_window, GeoTransform, PixelWindow};
pub use loader::{BandLoader, CogBandLoader, CogLoaderConfig, LANDSAT_BANDS};
pub use range_reader::HttpRangeReader;
