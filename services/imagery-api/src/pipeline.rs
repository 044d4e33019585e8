//! The image generation pipeline: validate, search, select, load, render,
//! store.

use serde::Serialize;
use tracing::{info, instrument};

use band_loader::LANDSAT_BANDS;
use renderer::{render_natural_color, render_ndvi, RenderError};
use scene_common::{BandSet, BoundingBox, ImageryError, ImageryResult, TimeRange};
use stac_client::{select_least_cloudy, SceneQuery};

use crate::metrics::{self, Timer};
use crate::state::AppState;
use crate::store::{ImageStore, NATURAL_COLOR_SUFFIX, NDVI_SUFFIX};

/// Route prefix under which stored images are served.
pub const DOWNLOAD_PREFIX: &str = "/download-image";

/// Download paths of the two generated images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedImages {
    pub natural_color_image: String,
    pub ndvi_image: String,
}

/// Encoded PNGs for one scene.
struct RenderedImages {
    natural_color: Vec<u8>,
    ndvi: Vec<u8>,
}

/// Run the whole pipeline for one request.
#[instrument(skip_all, fields(bbox = %bbox, time_of_interest = %time_of_interest))]
pub async fn generate_images(
    state: &AppState,
    bbox: &str,
    time_of_interest: &str,
) -> ImageryResult<GeneratedImages> {
    let bbox = BoundingBox::from_query_string(bbox)?;
    let time_range = TimeRange::new(time_of_interest);

    let query = SceneQuery {
        collection: state.search.collection.clone(),
        bbox,
        time_range,
        max_cloud_cover: state.search.max_cloud_cover,
    };

    let timer = Timer::start();
    let items = state.catalog.search(&query).await?;
    let search_ms = timer.record(metrics::SCENE_SEARCH_MS);

    let candidates = items.len();
    let scene = select_least_cloudy(items).ok_or(ImageryError::NoData)?;
    info!(
        scene = %scene.id,
        cloud_cover = ?scene.cloud_cover(),
        candidates,
        assets = ?scene.asset_names(),
        search_ms,
        "Selected scene"
    );

    let timer = Timer::start();
    let bands = state.loader.load(&scene, &LANDSAT_BANDS, &bbox).await?;
    let load_ms = timer.record(metrics::BAND_LOAD_MS);

    let timer = Timer::start();
    let rendered = tokio::task::spawn_blocking(move || render_scene(&bands))
        .await
        .map_err(|e| ImageryError::InternalError(e.to_string()))??;
    let render_ms = timer.record(metrics::RENDER_MS);

    let id = ImageStore::new_request_id();
    let natural_name = ImageStore::image_name(&id, NATURAL_COLOR_SUFFIX);
    let ndvi_name = ImageStore::image_name(&id, NDVI_SUFFIX);
    state.store.put(&natural_name, &rendered.natural_color).await?;
    state.store.put(&ndvi_name, &rendered.ndvi).await?;

    info!(
        request_id = %id,
        scene = %scene.id,
        load_ms,
        render_ms,
        "Generated images"
    );

    Ok(GeneratedImages {
        natural_color_image: download_path(&natural_name),
        ndvi_image: download_path(&ndvi_name),
    })
}

fn render_scene(bands: &BandSet) -> Result<RenderedImages, RenderError> {
    let natural_color = render_natural_color(bands)?;

    let band = |name: &str| {
        bands
            .get(name)
            .ok_or_else(|| RenderError::MissingBand(name.to_string()))
    };
    let ndvi = render_ndvi(band("red")?, band("nir08")?)?;

    Ok(RenderedImages {
        natural_color,
        ndvi,
    })
}

pub fn download_path(name: &str) -> String {
    format!("{}/{}", DOWNLOAD_PREFIX, name)
}
