// src/sources/wikimedia.rs
//! Wikimedia Commons provider. Two-step API: full-text search in the File
//! namespace, then an imageinfo lookup per title for the actual media URL.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

use crate::content::{ContentItem, Query};
use crate::sources::{provider_client, Source};

const DEFAULT_BASE_URL: &str = "https://commons.wikimedia.org";
const SEARCH_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct SearchEnvelope {
    pub query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct InfoEnvelope {
    pub query: Option<InfoQuery>,
}

#[derive(Debug, Deserialize)]
pub struct InfoQuery {
    #[serde(default)]
    pub pages: HashMap<String, InfoPage>,
}

#[derive(Debug, Deserialize)]
pub struct InfoPage {
    #[serde(default)]
    pub imageinfo: Vec<ImageInfo>,
}

#[derive(Debug, Deserialize)]
pub struct ImageInfo {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Build an item from one file title and its resolved image info.
pub fn file_to_item(file_title: &str, info: &ImageInfo) -> ContentItem {
    let display = file_title.strip_prefix("File:").unwrap_or(file_title);
    let mut item = ContentItem::text(display, "Free media from Wikimedia Commons.");
    item.url = Some(info.url.clone());
    item.thumbnail = Some(info.url.clone());
    item.source = Some("Wikimedia Commons".to_string());
    item.source_url = Some(format!("{DEFAULT_BASE_URL}/wiki/{file_title}"));
    item.author = Some("Wikimedia".to_string());
    item.width = info.width.or(Some(800));
    item.height = info.height.or(Some(600));
    item
}

pub struct WikimediaSource {
    client: reqwest::Client,
    base_url: String,
}

impl WikimediaSource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: provider_client()?,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    async fn image_info(&self, title: &str) -> Result<Option<ImageInfo>> {
        let envelope: InfoEnvelope = self
            .client
            .get(format!("{}/w/api.php", self.base_url))
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("titles", title),
                ("prop", "imageinfo"),
                ("iiprop", "url|size"),
            ])
            .send()
            .await
            .context("fetching wikimedia imageinfo")?
            .error_for_status()
            .context("wikimedia imageinfo status")?
            .json()
            .await
            .context("parsing wikimedia imageinfo")?;

        Ok(envelope
            .query
            .map(|q| q.pages)
            .unwrap_or_default()
            .into_values()
            .flat_map(|p| p.imageinfo)
            .next())
    }
}

#[async_trait]
impl Source for WikimediaSource {
    async fn fetch(&self, query: &Query) -> Result<Vec<ContentItem>> {
        let srsearch = format!("filetype:bitmap {}", query.text);
        let srlimit = SEARCH_LIMIT.to_string();
        let envelope: SearchEnvelope = self
            .client
            .get(format!("{}/w/api.php", self.base_url))
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("list", "search"),
                ("srsearch", srsearch.as_str()),
                ("srnamespace", "6"),
                ("srlimit", srlimit.as_str()),
            ])
            .send()
            .await
            .context("fetching wikimedia search")?
            .error_for_status()
            .context("wikimedia search status")?
            .json()
            .await
            .context("parsing wikimedia search")?;

        let hits = envelope.query.map(|q| q.search).unwrap_or_default();
        let mut items = Vec::with_capacity(hits.len());
        for hit in hits {
            // Per-title lookup failures drop that file only.
            match self.image_info(&hit.title).await {
                Ok(Some(info)) => items.push(file_to_item(&hit.title, &info)),
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(target: "sources", title = %hit.title, error = ?e, "imageinfo lookup failed");
                }
            }
        }
        Ok(items)
    }

    fn name(&self) -> &'static str {
        "Wikimedia Commons"
    }

    fn timeout(&self) -> std::time::Duration {
        // Up to SEARCH_LIMIT follow-up lookups after the search call.
        std::time::Duration::from_secs(15)
    }
}
