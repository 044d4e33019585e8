//! Scene band loading.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use projection::SceneCrs;
use scene_common::{BandSet, BoundingBox};
use stac_client::StacItem;

use crate::error::LoadError;
use crate::geotiff::read_window;
use crate::range_reader::{HttpRangeReader, DEFAULT_BLOCK_SIZE};

/// Bands loaded for every selected scene.
pub const LANDSAT_BANDS: [&str; 5] = ["nir08", "red", "green", "blue", "qa_pixel"];

/// Loads named bands of a scene, cropped to a lon/lat bounding box.
#[async_trait]
pub trait BandLoader: Send + Sync {
    async fn load(
        &self,
        item: &StacItem,
        bands: &[&str],
        bbox: &BoundingBox,
    ) -> Result<BandSet, LoadError>;
}

#[derive(Debug, Clone)]
pub struct CogLoaderConfig {
    pub request_timeout: Duration,
    /// Bytes fetched per range request
    pub block_size: u64,
    /// Points sampled along each bbox edge before projecting
    pub edge_samples: usize,
}

impl Default for CogLoaderConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(120),
            block_size: DEFAULT_BLOCK_SIZE,
            edge_samples: 21,
        }
    }
}

/// Reads bands straight from Cloud-Optimized GeoTIFF assets.
#[derive(Debug, Clone, Default)]
pub struct CogBandLoader {
    config: CogLoaderConfig,
}

impl CogBandLoader {
    pub fn new(config: CogLoaderConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl BandLoader for CogBandLoader {
    #[instrument(skip(self, item, bbox), fields(item = %item.id))]
    async fn load(
        &self,
        item: &StacItem,
        bands: &[&str],
        bbox: &BoundingBox,
    ) -> Result<BandSet, LoadError> {
        let epsg = item
            .epsg()
            .ok_or_else(|| LoadError::MissingCrs(item.id.clone()))?;
        let crs = SceneCrs::from_epsg(epsg)?;

        // Edges of a lon/lat box curve in UTM, so sample along them
        let envelope = crs
            .project_envelope(&bbox.densify(self.config.edge_samples))
            .ok_or_else(|| LoadError::EmptyWindow(item.id.clone()))?;
        debug!(epsg, ?envelope, "Projected bounding box");

        let mut sources = Vec::with_capacity(bands.len());
        for band in bands {
            let asset = item
                .asset(band)
                .ok_or_else(|| LoadError::MissingAsset(item.id.clone(), band.to_string()))?;
            sources.push((band.to_string(), asset.href.clone()));
        }

        let config = self.config.clone();
        let start = Instant::now();
        let loaded = tokio::task::spawn_blocking(move || read_bands(&config, sources, envelope))
            .await
            .map_err(|e| LoadError::Join(e.to_string()))??;

        info!(
            bands = loaded.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Loaded scene bands"
        );
        Ok(loaded)
    }
}

fn read_bands(
    config: &CogLoaderConfig,
    sources: Vec<(String, String)>,
    envelope: (f64, f64, f64, f64),
) -> Result<BandSet, LoadError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(config.request_timeout)
        .build()?;

    let mut loaded = BandSet::new();
    for (band, href) in sources {
        let mut reader = HttpRangeReader::new(client.clone(), href, config.block_size);
        let raster = read_window(&mut reader, envelope, &band)?;
        debug!(
            band = %band,
            width = raster.width,
            height = raster.height,
            requests = reader.requests(),
            "Read band window"
        );
        loaded.insert(band, raster);
    }
    Ok(loaded)
}
