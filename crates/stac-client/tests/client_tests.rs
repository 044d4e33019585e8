//! Tests for the STAC search client against an in-process fake catalog.
//!
//! The fake serves two pages of results (the second reached through a
//! merged POST `next` link) and a Planetary Computer style token endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use scene_common::{BoundingBox, TimeRange};
use stac_client::{
    select_least_cloudy, CatalogError, NoopSigner, PlanetaryComputerSigner, SceneCatalog,
    SceneQuery, StacClient, StacClientConfig,
};
use test_utils::{item_collection_json, landsat_item_json, sas_token_json};

#[derive(Clone, Default)]
struct FakeCatalog {
    searches: Arc<AtomicUsize>,
    token_requests: Arc<AtomicUsize>,
    base: Arc<String>,
}

async fn search(State(fake): State<FakeCatalog>, Json(body): Json<Value>) -> Json<Value> {
    fake.searches.fetch_add(1, Ordering::SeqCst);

    if body.get("token").is_some() {
        // The merged body must still carry the original filter
        assert_eq!(body["collections"], json!(["landsat-c2-l2"]));
        return Json(item_collection_json(
            vec![landsat_item_json("LC08_PAGE2", Some(2.0))],
            None,
        ));
    }

    assert_eq!(body["query"]["eo:cloud_cover"]["lt"], json!(30.0));
    let next = json!({
        "rel": "next",
        "href": format!("{}/api/stac/v1/search", fake.base),
        "method": "POST",
        "body": {"token": "next:page2"},
        "merge": true
    });
    Json(item_collection_json(
        vec![
            landsat_item_json("LC08_PAGE1_A", Some(12.0)),
            landsat_item_json("LC08_PAGE1_B", Some(25.0)),
        ],
        Some(next),
    ))
}

async fn empty_search() -> Json<Value> {
    Json(item_collection_json(Vec::new(), None))
}

async fn failing_search() -> (StatusCode, &'static str) {
    (StatusCode::BAD_GATEWAY, "upstream unavailable")
}

async fn token(State(fake): State<FakeCatalog>, Path(collection): Path<String>) -> Json<Value> {
    fake.token_requests.fetch_add(1, Ordering::SeqCst);
    assert_eq!(collection, "landsat-c2-l2");
    Json(sas_token_json("st=2031&sig=fake"))
}

/// Start the fake on a random port and return its base URL.
async fn spawn_fake(search_route: Router<FakeCatalog>) -> (String, FakeCatalog) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let fake = FakeCatalog {
        base: Arc::new(base.clone()),
        ..Default::default()
    };

    let app = search_route
        .route("/api/sas/v1/token/:collection", get(token))
        .with_state(fake.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (base, fake)
}

fn config(base: &str, max_pages: usize) -> StacClientConfig {
    StacClientConfig {
        base_url: format!("{}/api/stac/v1", base),
        request_timeout: Duration::from_secs(5),
        page_size: 2,
        max_pages,
    }
}

fn redmond_query() -> SceneQuery {
    SceneQuery::landsat(
        BoundingBox::new(-122.2751, 47.5469, -121.9613, 47.7458),
        TimeRange::default(),
    )
}

#[tokio::test]
async fn test_search_follows_next_links() {
    let (base, fake) = spawn_fake(Router::new().route("/api/stac/v1/search", post(search))).await;
    let client = StacClient::new(config(&base, 10), Arc::new(NoopSigner)).unwrap();

    let items = client.search(&redmond_query()).await.unwrap();

    assert_eq!(fake.searches.load(Ordering::SeqCst), 2);
    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["LC08_PAGE1_A", "LC08_PAGE1_B", "LC08_PAGE2"]);

    // Least cloudy scene lives on the second page
    assert_eq!(select_least_cloudy(items).unwrap().id, "LC08_PAGE2");
}

#[tokio::test]
async fn test_search_respects_page_limit() {
    let (base, fake) = spawn_fake(Router::new().route("/api/stac/v1/search", post(search))).await;
    let client = StacClient::new(config(&base, 1), Arc::new(NoopSigner)).unwrap();

    let items = client.search(&redmond_query()).await.unwrap();

    assert_eq!(fake.searches.load(Ordering::SeqCst), 1);
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn test_search_signs_blob_assets() {
    let (base, fake) = spawn_fake(Router::new().route("/api/stac/v1/search", post(search))).await;
    let signer = PlanetaryComputerSigner::new(
        format!("{}/api/sas/v1/token", base),
        Duration::from_secs(5),
    )
    .unwrap();
    let client = StacClient::new(config(&base, 10), Arc::new(signer)).unwrap();

    let items = client.search(&redmond_query()).await.unwrap();

    // One token per collection, not per item
    assert_eq!(fake.token_requests.load(Ordering::SeqCst), 1);
    for item in &items {
        let href = &item.asset("red").unwrap().href;
        assert!(href.ends_with("?st=2031&sig=fake"), "unsigned href {}", href);
    }
}

#[tokio::test]
async fn test_empty_search_skips_signing() {
    let (base, fake) =
        spawn_fake(Router::new().route("/api/stac/v1/search", post(empty_search))).await;
    let signer = PlanetaryComputerSigner::new(
        format!("{}/api/sas/v1/token", base),
        Duration::from_secs(5),
    )
    .unwrap();
    let client = StacClient::new(config(&base, 10), Arc::new(signer)).unwrap();

    let items = client.search(&redmond_query()).await.unwrap();

    assert!(items.is_empty());
    assert_eq!(fake.token_requests.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_search_error_status() {
    let (base, _fake) =
        spawn_fake(Router::new().route("/api/stac/v1/search", post(failing_search))).await;
    let client = StacClient::new(config(&base, 10), Arc::new(NoopSigner)).unwrap();

    let err = client.search(&redmond_query()).await.unwrap_err();
    match err {
        CatalogError::Status { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "upstream unavailable");
        }
        other => panic!("unexpected error {:?}", other),
    }
}
