// src/sources/dev_to.rs
//! Dev.to articles provider.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::content::{normalize_text, ContentItem, Query};
use crate::rng::SharedRng;
use crate::sources::{provider_client, Source};
use std::sync::Arc;

const DEFAULT_BASE_URL: &str = "https://dev.to";
const TAGS: &str = "javascript,python,ai,react,programming";

#[derive(Debug, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub user: Option<ArticleUser>,
}

#[derive(Debug, Deserialize)]
pub struct ArticleUser {
    pub name: Option<String>,
}

pub fn article_to_item(article: &Article) -> Option<ContentItem> {
    let title = normalize_text(&article.title);
    if title.is_empty() {
        return None;
    }
    let summary = normalize_text(article.description.as_deref().unwrap_or(&article.title));
    let author = article
        .user
        .as_ref()
        .and_then(|u| u.name.as_deref())
        .unwrap_or("a developer");
    let mut item = ContentItem::text(
        format!("📝 {title}"),
        format!("{summary}. Published on Dev.to by {author}."),
    );
    item.url = Some(article.url.clone());
    item.source = Some("Dev.to".to_string());
    item.author = Some(author.to_string());
    Some(item)
}

pub struct DevToSource {
    client: reqwest::Client,
    base_url: String,
    rng: Arc<SharedRng>,
}

impl DevToSource {
    pub fn new(rng: Arc<SharedRng>) -> Result<Self> {
        Ok(Self {
            client: provider_client()?,
            base_url: DEFAULT_BASE_URL.to_string(),
            rng,
        })
    }
}

#[async_trait]
impl Source for DevToSource {
    async fn fetch(&self, _query: &Query) -> Result<Vec<ContentItem>> {
        let url = format!("{}/api/articles?tag={TAGS}&top=7", self.base_url);
        let articles: Vec<Article> = self
            .client
            .get(url)
            .send()
            .await
            .context("fetching dev.to articles")?
            .error_for_status()
            .context("dev.to status")?
            .json()
            .await
            .context("parsing dev.to articles")?;

        let top = &articles[..articles.len().min(10)];
        if top.is_empty() {
            return Ok(Vec::new());
        }
        let article = &top[self.rng.pick_index(top.len())];
        Ok(article_to_item(article).into_iter().collect())
    }

    fn name(&self) -> &'static str {
        "Dev.to"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_maps_with_author_attribution() {
        let article: Article = serde_json::from_str(
            r#"{
                "title": "Async Rust in practice",
                "description": "Patterns that survive production",
                "url": "https://dev.to/x/async-rust",
                "user": { "name": "Jo Codes" }
            }"#,
        )
        .unwrap();
        let item = article_to_item(&article).unwrap();
        assert_eq!(item.title, "📝 Async Rust in practice");
        assert!(item.description.ends_with("Published on Dev.to by Jo Codes."));
        assert_eq!(item.author.as_deref(), Some("Jo Codes"));
    }

    #[test]
    fn missing_description_falls_back_to_title() {
        let article = Article {
            title: "Quick tip".into(),
            description: None,
            url: "https://dev.to/x/tip".into(),
            user: None,
        };
        let item = article_to_item(&article).unwrap();
        assert!(item.description.starts_with("Quick tip."));
        assert!(item.description.contains("by a developer"));
    }
}
