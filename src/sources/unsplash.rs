// src/sources/unsplash.rs
//! Unsplash image search via the public (unauthenticated) search endpoint.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::content::{ContentItem, Query};
use crate::sources::{provider_client, Source};

const DEFAULT_BASE_URL: &str = "https://unsplash.com";

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
pub struct Photo {
    pub urls: PhotoUrls,
    pub alt_description: Option<String>,
    pub links: PhotoLinks,
    pub user: PhotoUser,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoUrls {
    pub regular: String,
    pub small: String,
}

#[derive(Debug, Deserialize)]
pub struct PhotoLinks {
    pub html: String,
}

#[derive(Debug, Deserialize)]
pub struct PhotoUser {
    pub name: String,
}

pub fn photo_to_item(photo: &Photo, query: &str) -> ContentItem {
    let title = photo
        .alt_description
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| query.to_string());
    let mut item = ContentItem::text(title, format!("Unsplash photo for '{query}'."));
    item.url = Some(photo.urls.regular.clone());
    item.thumbnail = Some(photo.urls.small.clone());
    item.source = Some("Unsplash".to_string());
    item.source_url = Some(photo.links.html.clone());
    item.author = Some(photo.user.name.clone());
    item.width = photo.width;
    item.height = photo.height;
    item
}

pub struct UnsplashSource {
    client: reqwest::Client,
    base_url: String,
}

impl UnsplashSource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: provider_client()?,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }
}

#[async_trait]
impl Source for UnsplashSource {
    async fn fetch(&self, query: &Query) -> Result<Vec<ContentItem>> {
        let url = format!("{}/napi/search/photos", self.base_url);
        let resp: SearchResponse = self
            .client
            .get(url)
            .query(&[("query", query.text.as_str()), ("per_page", "10")])
            .send()
            .await
            .context("fetching unsplash search")?
            .error_for_status()
            .context("unsplash status")?
            .json()
            .await
            .context("parsing unsplash response")?;

        Ok(resp
            .results
            .iter()
            .map(|p| photo_to_item(p, &query.text))
            .collect())
    }

    fn name(&self) -> &'static str {
        "Unsplash"
    }
}
