//! Asset href signing.
//!
//! Some catalogs return asset hrefs that are only readable once a short-lived
//! token is appended. Signers run over every search result before the items
//! leave the client.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use crate::error::CatalogError;
use crate::item::StacItem;

#[async_trait]
pub trait AssetSigner: Send + Sync {
    /// Rewrite asset hrefs in place so they can be fetched.
    async fn sign_items(&self, items: &mut [StacItem]) -> Result<(), CatalogError>;
}

/// Leaves hrefs unchanged, for catalogs serving public assets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSigner;

#[async_trait]
impl AssetSigner for NoopSigner {
    async fn sign_items(&self, _items: &mut [StacItem]) -> Result<(), CatalogError> {
        Ok(())
    }
}

/// Response of the Planetary Computer token endpoint.
#[derive(Debug, Deserialize)]
struct SasToken {
    token: String,
    #[serde(rename = "msft:expiry", default)]
    expiry: Option<String>,
}

/// Appends Planetary Computer SAS tokens to Azure blob hrefs.
pub struct PlanetaryComputerSigner {
    client: Client,
    token_url: String,
}

impl PlanetaryComputerSigner {
    pub fn new(token_url: impl Into<String>, request_timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            token_url: token_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a read token for one collection.
    async fn token(&self, collection: &str) -> Result<String, CatalogError> {
        let url = format!("{}/{}", self.token_url, collection);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Signing(format!(
                "token endpoint returned {} for {}: {}",
                status.as_u16(),
                collection,
                body
            )));
        }

        let token: SasToken = response
            .json()
            .await
            .map_err(|e| CatalogError::Signing(format!("invalid token response: {}", e)))?;
        debug!(collection = %collection, expiry = ?token.expiry, "Fetched SAS token");
        Ok(token.token)
    }
}

#[async_trait]
impl AssetSigner for PlanetaryComputerSigner {
    async fn sign_items(&self, items: &mut [StacItem]) -> Result<(), CatalogError> {
        let collections: BTreeSet<String> = items
            .iter()
            .filter_map(|item| item.collection.clone())
            .collect();

        for collection in collections {
            let token = self.token(&collection).await?;
            for item in items
                .iter_mut()
                .filter(|item| item.collection.as_deref() == Some(collection.as_str()))
            {
                for asset in item.assets.values_mut() {
                    if needs_signature(&asset.href) {
                        asset.href = append_token(&asset.href, &token);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Azure blob hrefs without an existing signature.
fn needs_signature(href: &str) -> bool {
    let Ok(url) = Url::parse(href) else {
        return false;
    };
    let is_blob = url
        .host_str()
        .is_some_and(|host| host.ends_with(".blob.core.windows.net"));
    let signed = url.query_pairs().any(|(key, _)| key == "sig");
    is_blob && !signed
}

fn append_token(href: &str, token: &str) -> String {
    let separator = if href.contains('?') { '&' } else { '?' };
    format!("{}{}{}", href, separator, token.trim_start_matches('?'))
}
