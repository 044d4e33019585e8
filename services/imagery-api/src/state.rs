//! Application state shared by every handler.

use std::sync::Arc;

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;

use band_loader::{BandLoader, CogBandLoader};
use stac_client::{SceneCatalog, StacClient, LANDSAT_COLLECTION, MAX_CLOUD_COVER};

use crate::config::ServiceArgs;
use crate::store::ImageStore;

/// Search settings applied to every request.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub collection: String,
    pub max_cloud_cover: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            collection: LANDSAT_COLLECTION.to_string(),
            max_cloud_cover: MAX_CLOUD_COVER,
        }
    }
}

pub struct AppState {
    /// Scene catalog, constructed once at startup.
    pub catalog: Arc<dyn SceneCatalog>,

    /// Band loader, constructed once at startup.
    pub loader: Arc<dyn BandLoader>,

    /// Where generated images are written and served from.
    pub store: ImageStore,

    pub search: SearchSettings,

    /// Installed recorder, rendered at `/metrics`.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn SceneCatalog>,
        loader: Arc<dyn BandLoader>,
        store: ImageStore,
    ) -> Self {
        Self {
            catalog,
            loader,
            store,
            search: SearchSettings::default(),
            prometheus: None,
        }
    }

    /// Build production state: a STAC client against the configured catalog
    /// and a COG loader.
    pub async fn from_args(args: &ServiceArgs, prometheus: Option<PrometheusHandle>) -> Result<Self> {
        let catalog = StacClient::new(args.stac_config(), args.signer()?)?;
        let loader = CogBandLoader::new(args.loader_config());

        let store = ImageStore::new(&args.output_dir);
        store.ensure_dir().await?;

        Ok(Self {
            catalog: Arc::new(catalog),
            loader: Arc::new(loader),
            store,
            search: SearchSettings {
                collection: args.collection.clone(),
                max_cloud_cover: args.max_cloud_cover,
            },
            prometheus,
        })
    }
}
