//! STAC item model.
//!
//! Only the fields the pipeline reads are typed; everything else is kept in
//! the flattened `extra` maps so items round-trip unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single scene returned by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StacItem {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,

    #[serde(default)]
    pub properties: ItemProperties,

    #[serde(default)]
    pub assets: BTreeMap<String, Asset>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,

    /// Percentage of the scene obscured by cloud.
    #[serde(rename = "eo:cloud_cover", default, skip_serializing_if = "Option::is_none")]
    pub cloud_cover: Option<f64>,

    #[serde(rename = "proj:epsg", default, skip_serializing_if = "Option::is_none")]
    pub epsg: Option<u32>,

    /// Projection extension v2 form, e.g. `"EPSG:32610"`.
    #[serde(rename = "proj:code", default, skip_serializing_if = "Option::is_none")]
    pub proj_code: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A retrievable file belonging to an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub href: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StacItem {
    /// Cloud cover if present and finite.
    pub fn cloud_cover(&self) -> Option<f64> {
        self.properties.cloud_cover.filter(|cc| cc.is_finite())
    }

    /// EPSG code of the scene's native CRS.
    pub fn epsg(&self) -> Option<u32> {
        self.properties.epsg.or_else(|| {
            self.properties
                .proj_code
                .as_deref()
                .and_then(|code| code.strip_prefix("EPSG:"))
                .and_then(|n| n.parse().ok())
        })
    }

    pub fn asset(&self, name: &str) -> Option<&Asset> {
        self.assets.get(name)
    }

    /// Asset keys in sorted order.
    pub fn asset_names(&self) -> Vec<&str> {
        self.assets.keys().map(String::as_str).collect()
    }
}

/// One page of `/search` results.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemCollection {
    #[serde(default)]
    pub features: Vec<StacItem>,

    #[serde(default)]
    pub links: Vec<Link>,
}

impl ItemCollection {
    pub fn next_link(&self) -> Option<&Link> {
        self.links.iter().find(|link| link.rel == "next")
    }
}

/// A STAC link, including the paging extensions used by `/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,

    #[serde(default)]
    pub method: Option<String>,

    #[serde(default)]
    pub body: Option<Value>,

    #[serde(default)]
    pub merge: Option<bool>,
}
