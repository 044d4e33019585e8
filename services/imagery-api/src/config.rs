//! Command-line and environment configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use band_loader::CogLoaderConfig;
use stac_client::{
    AssetSigner, CatalogError, NoopSigner, PlanetaryComputerSigner, StacClientConfig,
    LANDSAT_COLLECTION, MAX_CLOUD_COVER, PLANETARY_COMPUTER_SAS_URL, PLANETARY_COMPUTER_STAC_URL,
};

use crate::cleanup::{CleanupConfig, MAX_RETENTION_HOURS};

/// How asset hrefs returned by the catalog are made readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SigningMode {
    /// Append a Planetary Computer SAS token to Azure blob hrefs
    PlanetaryComputer,
    /// Use hrefs as returned
    None,
}

/// Landsat imagery server
#[derive(Parser, Debug, Clone)]
#[command(name = "imagery-api")]
#[command(about = "Generates natural color and NDVI images for a bounding box")]
pub struct ServiceArgs {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8000", env = "IMAGERY_LISTEN_ADDR")]
    pub listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Number of tokio worker threads (default: number of CPU cores)
    #[arg(long, env = "IMAGERY_WORKER_THREADS")]
    pub worker_threads: Option<usize>,

    /// STAC API root
    #[arg(long, default_value = PLANETARY_COMPUTER_STAC_URL, env = "STAC_CATALOG_URL")]
    pub catalog_url: String,

    /// Collection searched for scenes
    #[arg(long, default_value = LANDSAT_COLLECTION, env = "STAC_COLLECTION")]
    pub collection: String,

    /// Scenes must have cloud cover strictly below this percentage
    #[arg(long, default_value_t = MAX_CLOUD_COVER, env = "MAX_CLOUD_COVER")]
    pub max_cloud_cover: f64,

    /// Asset signing
    #[arg(long, value_enum, default_value_t = SigningMode::PlanetaryComputer, env = "ASSET_SIGNING")]
    pub signing: SigningMode,

    /// SAS token endpoint used by planetary-computer signing
    #[arg(long, default_value = PLANETARY_COMPUTER_SAS_URL, env = "SAS_TOKEN_URL")]
    pub sas_url: String,

    /// Directory generated images are written to
    #[arg(long, default_value = ".", env = "IMAGERY_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Timeout for every outbound HTTP request
    #[arg(long, default_value_t = 120, env = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: u64,

    /// Maximum number of search result pages followed
    #[arg(long, default_value_t = 20, env = "STAC_MAX_PAGES")]
    pub max_pages: usize,

    /// Delete images older than this many hours (0 keeps them forever)
    #[arg(long, default_value_t = 24, env = "RETENTION_HOURS")]
    pub retention_hours: u64,

    /// How often the retention sweep runs
    #[arg(long, default_value_t = 3600, env = "CLEANUP_INTERVAL_SECS")]
    pub cleanup_interval_secs: u64,
}

impl ServiceArgs {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn stac_config(&self) -> StacClientConfig {
        StacClientConfig {
            base_url: self.catalog_url.trim_end_matches('/').to_string(),
            request_timeout: self.request_timeout(),
            max_pages: self.max_pages,
            ..Default::default()
        }
    }

    pub fn loader_config(&self) -> CogLoaderConfig {
        CogLoaderConfig {
            request_timeout: self.request_timeout(),
            ..Default::default()
        }
    }

    pub fn cleanup_config(&self) -> CleanupConfig {
        CleanupConfig {
            enabled: self.retention_hours > 0,
            interval_secs: self.cleanup_interval_secs.max(1),
            retention_hours: self.retention_hours.min(MAX_RETENTION_HOURS),
        }
    }

    pub fn signer(&self) -> Result<Arc<dyn AssetSigner>, CatalogError> {
        Ok(match self.signing {
            SigningMode::PlanetaryComputer => Arc::new(PlanetaryComputerSigner::new(
                self.sas_url.clone(),
                self.request_timeout(),
            )?),
            SigningMode::None => Arc::new(NoopSigner),
        })
    }
}
