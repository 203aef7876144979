// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET  /health
// - POST /api/get-fact
// - POST /api/get-latest-news
// - POST /api/search-images  (success and empty-query rejection)

mod common;

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value as Json};
use tower::ServiceExt as _; // for `oneshot`

use common::{base_deps, image_item, StaticSource};
use tech_content_aggregator::api::{self, AppState};
use tech_content_aggregator::config::EngineConfig;
use tech_content_aggregator::service::ContentService;
use tech_content_aggregator::sources::Source;

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

/// Build the same Router the binary uses, over stub dependencies.
fn test_router() -> Router {
    let mut deps = base_deps(11);
    deps.image_sources = vec![Arc::new(StaticSource::new(
        "stub-images",
        vec![
            image_item("https://img.example.com/1.jpg", "Butterfly one"),
            image_item("https://img.example.com/2.jpg", "Butterfly two"),
        ],
    )) as Arc<dyn Source>];
    let mut cfg = EngineConfig::default();
    cfg.min_validated = 1;
    let state = AppState {
        service: Arc::new(ContentService::new(cfg, deps)),
    };
    api::router(state)
}

async fn json_body(resp: axum::response::Response) -> Json {
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let app = test_router();

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK, "health should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    assert_eq!(std::str::from_utf8(&bytes).expect("utf8").trim(), "OK");
}

#[tokio::test]
async fn api_get_fact_returns_expected_json_fields() {
    let app = test_router();

    let req = Request::builder()
        .method("POST")
        .uri("/api/get-fact")
        .header("x-session-id", "test-session")
        .body(Body::empty())
        .expect("build POST /api/get-fact");

    let resp = app.oneshot(req).await.expect("oneshot /api/get-fact");
    assert_eq!(resp.status(), StatusCode::OK);

    let v = json_body(resp).await;
    assert!(v.get("title").is_some(), "missing 'title'");
    assert!(v.get("description").is_some(), "missing 'description'");
    assert!(
        v.get("image_suggestion").is_some(),
        "missing 'image_suggestion'"
    );
}

#[tokio::test]
async fn api_get_latest_news_returns_a_story_with_a_link() {
    let app = test_router();

    let req = Request::builder()
        .method("POST")
        .uri("/api/get-latest-news")
        .body(Body::empty())
        .expect("build POST /api/get-latest-news");

    let resp = app.oneshot(req).await.expect("oneshot /api/get-latest-news");
    assert_eq!(resp.status(), StatusCode::OK);

    let v = json_body(resp).await;
    assert!(v.get("title").is_some(), "missing 'title'");
    assert!(v.get("url").is_some(), "missing 'url'");
}

#[tokio::test]
async fn api_search_images_returns_rewritten_local_references() {
    let app = test_router();

    let payload = json!({ "query": "butterfly", "count": 2 });
    let req = Request::builder()
        .method("POST")
        .uri("/api/search-images")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST /api/search-images");

    let resp = app.oneshot(req).await.expect("oneshot /api/search-images");
    assert_eq!(resp.status(), StatusCode::OK);

    let v = json_body(resp).await;
    assert_eq!(v["query"], "butterfly");
    assert_eq!(v["total_results"], 2);
    let images = v["images"].as_array().expect("images array");
    assert_eq!(images.len(), 2);
    for img in images {
        let url = img["url"].as_str().expect("image url");
        assert!(
            url.starts_with("/static/generated_images/"),
            "url must point at local storage, got '{url}'"
        );
    }
}

#[tokio::test]
async fn api_search_images_rejects_an_empty_query() {
    let app = test_router();

    let payload = json!({ "query": "" });
    let req = Request::builder()
        .method("POST")
        .uri("/api/search-images")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST /api/search-images");

    let resp = app.oneshot(req).await.expect("oneshot /api/search-images");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let v = json_body(resp).await;
    assert!(v.get("error").is_some(), "missing 'error'");
}
