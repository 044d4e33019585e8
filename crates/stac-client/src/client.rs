//! STAC `/search` client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

use scene_common::{BoundingBox, TimeRange};

use crate::error::CatalogError;
use crate::item::{ItemCollection, Link, StacItem};
use crate::signing::AssetSigner;
use crate::{LANDSAT_COLLECTION, MAX_CLOUD_COVER, PLANETARY_COMPUTER_STAC_URL};

/// Source of candidate scenes.
#[async_trait]
pub trait SceneCatalog: Send + Sync {
    /// Every item matching the query, with asset hrefs ready to fetch.
    async fn search(&self, query: &SceneQuery) -> Result<Vec<StacItem>, CatalogError>;
}

/// Spatial, temporal and cloud-cover filter for one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneQuery {
    pub collection: String,
    pub bbox: BoundingBox,
    pub time_range: TimeRange,
    /// Exclusive upper bound on `eo:cloud_cover`.
    pub max_cloud_cover: f64,
}

impl SceneQuery {
    /// Landsat Collection 2 Level-2 scenes under 30% cloud cover.
    pub fn landsat(bbox: BoundingBox, time_range: TimeRange) -> Self {
        Self {
            collection: LANDSAT_COLLECTION.to_string(),
            bbox,
            time_range,
            max_cloud_cover: MAX_CLOUD_COVER,
        }
    }

    fn to_request(&self, limit: u32) -> SearchRequest<'_> {
        SearchRequest {
            collections: vec![self.collection.as_str()],
            bbox: self.bbox.to_array(),
            datetime: self.time_range.as_str(),
            query: json!({ "eo:cloud_cover": { "lt": self.max_cloud_cover } }),
            limit,
        }
    }
}

/// Body of a `POST /search` request.
#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    collections: Vec<&'a str>,
    bbox: [f64; 4],
    datetime: &'a str,
    query: Value,
    limit: u32,
}

/// Configuration for the search client.
#[derive(Debug, Clone)]
pub struct StacClientConfig {
    /// API root, e.g. `https://planetarycomputer.microsoft.com/api/stac/v1`
    pub base_url: String,
    /// HTTP request timeout
    pub request_timeout: Duration,
    /// Items requested per page
    pub page_size: u32,
    /// Stop following `next` links after this many pages
    pub max_pages: usize,
}

impl Default for StacClientConfig {
    fn default() -> Self {
        Self {
            base_url: PLANETARY_COMPUTER_STAC_URL.to_string(),
            request_timeout: Duration::from_secs(120),
            page_size: 100,
            max_pages: 20,
        }
    }
}

/// A page request derived from a `next` link.
#[derive(Debug, Clone, PartialEq)]
enum PageRequest {
    Get { url: String },
    Post { url: String, body: Value },
}

/// STAC API client.
pub struct StacClient {
    client: Client,
    config: StacClientConfig,
    signer: Arc<dyn AssetSigner>,
}

impl StacClient {
    pub fn new(config: StacClientConfig, signer: Arc<dyn AssetSigner>) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            config,
            signer,
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.base_url.trim_end_matches('/'))
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<ItemCollection, CatalogError> {
        let response = match request {
            PageRequest::Get { url } => self.client.get(url).send().await?,
            PageRequest::Post { url, body } => self.client.post(url).json(body).send().await?,
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<ItemCollection>()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

#[async_trait]
impl SceneCatalog for StacClient {
    #[instrument(skip(self), fields(collection = %query.collection, datetime = %query.time_range))]
    async fn search(&self, query: &SceneQuery) -> Result<Vec<StacItem>, CatalogError> {
        let body = serde_json::to_value(query.to_request(self.config.page_size))
            .map_err(|e| CatalogError::Decode(e.to_string()))?;
        let mut request = PageRequest::Post {
            url: self.search_url(),
            body,
        };

        let mut items = Vec::new();
        let mut pages = 0;
        loop {
            let page = self.fetch_page(&request).await?;
            pages += 1;
            debug!(page = pages, features = page.features.len(), "Fetched search page");

            let next = page.next_link().map(|link| next_page_request(link, &request));
            items.extend(page.features);

            match next {
                Some(next) if pages < self.config.max_pages => request = next,
                Some(_) => {
                    warn!(
                        max_pages = self.config.max_pages,
                        items = items.len(),
                        "Search page limit reached, ignoring remaining results"
                    );
                    break;
                }
                None => break,
            }
        }

        info!(items = items.len(), pages = pages, "Scene search complete");

        self.signer.sign_items(&mut items).await?;
        Ok(items)
    }
}

/// Build the request for a `next` link.
///
/// POST links carry their own body; with `merge: true` it is layered over the
/// previous request body. Links without a method are plain GETs.
fn next_page_request(link: &Link, previous: &PageRequest) -> PageRequest {
    let is_post = link
        .method
        .as_deref()
        .is_some_and(|m| m.eq_ignore_ascii_case("POST"));
    if !is_post {
        return PageRequest::Get {
            url: link.href.clone(),
        };
    }

    let previous_body = match previous {
        PageRequest::Post { body, .. } => Some(body),
        PageRequest::Get { .. } => None,
    };

    let body = match (&link.body, previous_body) {
        (Some(link_body), Some(prev)) if link.merge.unwrap_or(false) => merge_bodies(prev, link_body),
        (Some(link_body), _) => link_body.clone(),
        (None, Some(prev)) => prev.clone(),
        (None, None) => json!({}),
    };

    PageRequest::Post {
        url: link.href.clone(),
        body,
    }
}

fn merge_bodies(base: &Value, overlay: &Value) -> Value {
    let mut merged = base.clone();
    if let (Some(target), Some(source)) = (merged.as_object_mut(), overlay.as_object()) {
        for (key, value) in source {
            target.insert(key.clone(), value.clone());
        }
    }
    merged
}
