// src/api.rs
//! Thin HTTP surface over `ContentService`. Route wiring and JSON shaping
//! only; all engine logic lives behind the service facade.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::content::ContentItem;
use crate::service::{ContentService, ServiceError};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ContentService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/get-fact", post(get_fact))
        .route("/api/get-latest-news", post(get_latest_news))
        .route("/api/search-images", post(search_images))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Consumers identify themselves with an opaque session header; absent
/// headers collapse into one anonymous consumer.
fn consumer_id(headers: &HeaderMap) -> String {
    headers
        .get("x-session-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or("anonymous")
        .to_string()
}

async fn get_fact(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let consumer = consumer_id(&headers);
    let svc = Arc::clone(&state.service);
    // Spawn so an engine panic degrades to the fixed error shape instead of
    // a connection reset.
    match tokio::spawn(async move { svc.get_fact(&consumer).await }).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => {
            error!(target: "api", error = ?e, "get-fact failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "title": "Error",
                    "description": "Sorry, we couldn't fetch a tech fact right now. Please try again later.",
                    "image_suggestion": "Error icon"
                })),
            )
                .into_response()
        }
    }
}

async fn get_latest_news(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let consumer = consumer_id(&headers);
    let svc = Arc::clone(&state.service);
    match tokio::spawn(async move { svc.get_news(&consumer).await }).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => {
            error!(target: "api", error = ?e, "get-latest-news failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "title": "Error",
                    "description": "Sorry, we couldn't fetch the latest news right now. Please try again later.",
                    "url": ""
                })),
            )
                .into_response()
        }
    }
}

#[derive(Deserialize)]
struct SearchImagesReq {
    #[serde(default)]
    query: String,
    #[serde(default)]
    count: Option<usize>,
}

#[derive(Serialize)]
struct SearchImagesResp {
    query: String,
    total_results: usize,
    images: Vec<ContentItem>,
}

async fn search_images(
    State(state): State<AppState>,
    Json(body): Json<SearchImagesReq>,
) -> Response {
    match state.service.get_images(&body.query, body.count).await {
        Ok(result) => (
            StatusCode::OK,
            Json(SearchImagesResp {
                query: result.query,
                total_results: result.images.len(),
                images: result.images,
            }),
        )
            .into_response(),
        Err(ServiceError::EmptyQuery) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Please provide a query for image search" })),
        )
            .into_response(),
        Err(ServiceError::AllImagesFailed) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to generate any images. Please try again." })),
        )
            .into_response(),
        Err(ServiceError::Internal(e)) => {
            error!(target: "api", error = ?e, "search-images failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "An unexpected error occurred. Please try again." })),
            )
                .into_response()
        }
    }
}
