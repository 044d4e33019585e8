//! STAC catalog access for scene search.
//!
//! - `item`: the subset of the STAC item model the pipeline reads
//! - `client`: `/search` client with paging, behind the `SceneCatalog` trait
//! - `signing`: asset href signing applied to search results
//! - `selection`: least-cloudy scene selection

pub mod client;
pub mod error;
pub mod item;
pub mod selection;
pub mod signing;

pub use client::{SceneCatalog, SceneQuery, StacClient, StacClientConfig};
pub use error::CatalogError;
pub use item::{Asset, ItemCollection, ItemProperties, Link, StacItem};
pub use selection::select_least_cloudy;
pub use signing::{AssetSigner, NoopSigner, PlanetaryComputerSigner};

/// Landsat Collection 2 Level-2 collection id.
pub const LANDSAT_COLLECTION: &str = "landsat-c2-l2";

/// Scenes at or above this cloud-cover percentage are not searched for.
pub const MAX_CLOUD_COVER: f64 = 30.0;

/// Planetary Computer STAC API root.
pub const PLANETARY_COMPUTER_STAC_URL: &str = "https://planetarycomputer.microsoft.com/api/stac/v1";

/// Planetary Computer SAS token endpoint.
pub const PLANETARY_COMPUTER_SAS_URL: &str = "https://planetarycomputer.microsoft.com/api/sas/v1/token";
