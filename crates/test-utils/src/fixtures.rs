//! Common test fixtures for landsat-imagery tests.
//!
//! This module provides pre-defined request parameters and STAC documents
//! that represent common scenarios in scene search.

use serde_json::{json, Value};

/// Common bounding box query strings for testing.
pub mod bbox {
    /// Redmond, WA
    pub const REDMOND: &str = "-122.2751,47.5469,-121.9613,47.7458";

    /// Too few values
    pub const THREE_VALUES: &str = "1,2,3";

    /// Non-numeric values
    pub const NON_NUMERIC: &str = "a,b,c,d";
}

/// Band names requested for every scene.
pub const LANDSAT_BANDS: [&str; 5] = ["nir08", "red", "green", "blue", "qa_pixel"];

/// A Landsat Collection 2 Level-2 item shaped like the Planetary Computer's.
///
/// Assets point at `https://landsateuwest.blob.core.windows.net/...` so that
/// signing logic sees them as Azure blobs.
pub fn landsat_item_json(id: &str, cloud_cover: Option<f64>) -> Value {
    let mut assets = serde_json::Map::new();
    for band in LANDSAT_BANDS.iter().chain(["swir16", "lwir11"].iter()) {
        assets.insert(
            band.to_string(),
            json!({
                "href": format!(
                    "https://landsateuwest.blob.core.windows.net/landsat-c2/level-2/{}/{}_SR_{}.TIF",
                    id, id, band.to_uppercase()
                ),
                "type": "image/tiff; application=geotiff; profile=cloud-optimized",
                "roles": ["data"],
                "title": format!("{} band", band)
            }),
        );
    }

    let mut properties = json!({
        "datetime": "2021-07-14T18:54:12.345Z",
        "platform": "landsat-8",
        "proj:epsg": 32610,
        "proj:shape": [7801, 7691]
    });
    if let Some(cc) = cloud_cover {
        properties["eo:cloud_cover"] = json!(cc);
    }

    json!({
        "type": "Feature",
        "stac_version": "1.0.0",
        "id": id,
        "collection": "landsat-c2-l2",
        "bbox": [-123.1, 46.4, -120.0, 48.6],
        "geometry": null,
        "properties": properties,
        "assets": assets,
        "links": []
    })
}

/// A search response page.
pub fn item_collection_json(features: Vec<Value>, next: Option<Value>) -> Value {
    let mut links = vec![json!({"rel": "root", "href": "https://example.com/api/stac/v1/"})];
    if let Some(next) = next {
        links.push(next);
    }
    json!({
        "type": "FeatureCollection",
        "features": features,
        "links": links
    })
}

/// A Planetary Computer SAS token response.
pub fn sas_token_json(token: &str) -> Value {
    json!({
        "msft:expiry": "2031-01-01T00:00:00Z",
        "token": token
    })
}
