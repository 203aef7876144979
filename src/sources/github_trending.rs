// src/sources/github_trending.rs
//! GitHub trending provider: repositories created in the last week, sorted
//! by stars, one picked from the top five.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use serde::Deserialize;

use crate::content::{normalize_text, ContentItem, Query};
use crate::rng::SharedRng;
use crate::sources::{provider_client, Source};
use std::sync::Arc;

const DEFAULT_BASE_URL: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<Repo>,
}

#[derive(Debug, Deserialize)]
pub struct Repo {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stargazers_count: u64,
    pub language: Option<String>,
}

pub fn repo_to_item(repo: &Repo) -> ContentItem {
    let description = normalize_text(
        repo.description
            .as_deref()
            .unwrap_or("A trending repository on GitHub"),
    );
    let mut item = ContentItem::text(
        format!("⭐ {} - Trending on GitHub", repo.name),
        format!(
            "{}. This project has gained {} stars and is written in {}.",
            description,
            repo.stargazers_count,
            repo.language.as_deref().unwrap_or("various languages"),
        ),
    );
    item.url = Some(repo.html_url.clone());
    item.source = Some("GitHub".to_string());
    item
}

pub struct GithubTrendingSource {
    client: reqwest::Client,
    base_url: String,
    rng: Arc<SharedRng>,
}

impl GithubTrendingSource {
    pub fn new(rng: Arc<SharedRng>) -> Result<Self> {
        Ok(Self {
            client: provider_client()?,
            base_url: DEFAULT_BASE_URL.to_string(),
            rng,
        })
    }
}

#[async_trait]
impl Source for GithubTrendingSource {
    async fn fetch(&self, _query: &Query) -> Result<Vec<ContentItem>> {
        let week_ago = (Utc::now() - ChronoDuration::days(7))
            .format("%Y-%m-%d")
            .to_string();
        let url = format!(
            "{}/search/repositories?q=created:>{week_ago}&sort=stars&order=desc&per_page=10",
            self.base_url
        );

        let resp: SearchResponse = self
            .client
            .get(url)
            .send()
            .await
            .context("fetching github trending")?
            .error_for_status()
            .context("github trending status")?
            .json()
            .await
            .context("parsing github search response")?;

        let top = &resp.items[..resp.items.len().min(5)];
        if top.is_empty() {
            return Ok(Vec::new());
        }
        let repo = &top[self.rng.pick_index(top.len())];
        Ok(vec![repo_to_item(repo)])
    }

    fn name(&self) -> &'static str {
        "GitHub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_maps_with_stars_and_language() {
        let repo: Repo = serde_json::from_str(
            r#"{
                "name": "tinygrad",
                "description": "A small autograd engine",
                "html_url": "https://github.com/x/tinygrad",
                "stargazers_count": 4200,
                "language": "Rust"
            }"#,
        )
        .unwrap();
        let item = repo_to_item(&repo);
        assert_eq!(item.title, "⭐ tinygrad - Trending on GitHub");
        assert!(item.description.contains("4200 stars"));
        assert!(item.description.contains("written in Rust"));
        assert_eq!(item.url.as_deref(), Some("https://github.com/x/tinygrad"));
    }

    #[test]
    fn missing_fields_get_defaults() {
        let repo = Repo {
            name: "mystery".into(),
            description: None,
            html_url: "https://github.com/x/mystery".into(),
            stargazers_count: 12,
            language: None,
        };
        let item = repo_to_item(&repo);
        assert!(item.description.contains("A trending repository on GitHub"));
        assert!(item.description.contains("various languages"));
    }
}
