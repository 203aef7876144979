// src/sources/reddit.rs
//! Reddit image provider. Key-free public `search.json` queries against a
//! small set of photography subreddits chosen by query topic; only direct
//! image links survive (galleries and hosted video are skipped).

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::content::{ContentItem, Query};
use crate::sources::{provider_client, Source};

const DEFAULT_BASE_URL: &str = "https://www.reddit.com";
/// Per-request subreddit cap and overall result cap.
const MAX_SUBREDDITS: usize = 2;
const MAX_RESULTS: usize = 3;
const MAX_TITLE_CHARS: usize = 100;

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: Option<ListingData>,
}

#[derive(Debug, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<PostWrapper>,
}

#[derive(Debug, Deserialize)]
pub struct PostWrapper {
    pub data: Post,
}

#[derive(Debug, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub url: String,
    pub title: Option<String>,
    pub permalink: Option<String>,
    pub author: Option<String>,
    pub preview: Option<Preview>,
}

#[derive(Debug, Deserialize)]
pub struct Preview {
    #[serde(default)]
    pub images: Vec<PreviewImage>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewImage {
    pub source: Option<PreviewSource>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewSource {
    pub url: Option<String>,
}

/// Route the query to topically matching subreddits, with a general
/// photography fallback.
pub fn subreddits_for(query: &str) -> &'static [&'static str] {
    let q = query.to_lowercase();
    let matches = |words: &[&str]| words.iter().any(|w| q.contains(w));
    if matches(&["animal", "bird", "cat", "dog", "wildlife", "butterfly", "nature"]) {
        &["wildlifephotography", "animalporn", "natureporn", "itookapicture"]
    } else if matches(&["landscape", "mountain", "sunset", "ocean", "forest"]) {
        &["earthporn", "landscapephotography", "natureporn"]
    } else if matches(&["city", "building", "architecture", "urban"]) {
        &["cityporn", "architectureporn", "urbanhell"]
    } else {
        &["pics", "itookapicture", "photographs"]
    }
}

/// Only direct image links count; gallery pages and hosted video never
/// resolve to a downloadable image.
pub fn is_direct_image_url(url: &str) -> bool {
    let u = url.to_lowercase();
    if u.contains("reddit.com/gallery") || u.contains("v.redd.it") {
        return false;
    }
    IMAGE_EXTENSIONS.iter().any(|ext| u.contains(ext))
}

pub fn post_to_item(post: &Post, subreddit: &str, query: &str) -> Option<ContentItem> {
    if !is_direct_image_url(&post.url) {
        return None;
    }
    // Preview URLs come HTML-escaped out of the listing payload.
    let thumbnail = post
        .preview
        .as_ref()
        .and_then(|p| p.images.first())
        .and_then(|i| i.source.as_ref())
        .and_then(|s| s.url.clone())
        .map(|u| u.replace("&amp;", "&"))
        .unwrap_or_else(|| post.url.clone());

    let mut title = post
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| query.to_string());
    if title.chars().count() > MAX_TITLE_CHARS {
        title = title.chars().take(MAX_TITLE_CHARS).collect();
    }

    let mut item = ContentItem::text(title, format!("Community photo from r/{subreddit}."));
    item.url = Some(post.url.clone());
    item.thumbnail = Some(thumbnail);
    item.source = Some(format!("Reddit r/{subreddit}"));
    item.source_url = Some(format!(
        "https://reddit.com{}",
        post.permalink.as_deref().unwrap_or("")
    ));
    item.author = Some(post.author.clone().unwrap_or_else(|| "Reddit User".into()));
    item.width = Some(800);
    item.height = Some(600);
    Some(item)
}

pub struct RedditSource {
    client: reqwest::Client,
    base_url: String,
}

impl RedditSource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: provider_client()?,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    async fn search_subreddit(&self, subreddit: &str, query: &str) -> Result<Listing> {
        self.client
            .get(format!("{}/r/{subreddit}/search.json", self.base_url))
            .query(&[
                ("q", query),
                ("restrict_sr", "1"),
                ("limit", "3"),
                ("sort", "top"),
                ("t", "month"),
            ])
            .send()
            .await
            .context("fetching reddit search")?
            .error_for_status()
            .context("reddit search status")?
            .json()
            .await
            .context("parsing reddit listing")
    }
}

#[async_trait]
impl Source for RedditSource {
    async fn fetch(&self, query: &Query) -> Result<Vec<ContentItem>> {
        let mut items = Vec::new();
        for subreddit in subreddits_for(&query.text).iter().take(MAX_SUBREDDITS).copied() {
            // Per-subreddit failures drop that subreddit only.
            let listing = match self.search_subreddit(subreddit, &query.text).await {
                Ok(listing) => listing,
                Err(e) => {
                    tracing::debug!(target: "sources", subreddit, error = ?e, "subreddit search failed");
                    continue;
                }
            };
            let children = listing.data.map(|d| d.children).unwrap_or_default();
            for child in children {
                if let Some(item) = post_to_item(&child.data, subreddit, &query.text) {
                    items.push(item);
                    if items.len() >= MAX_RESULTS {
                        return Ok(items);
                    }
                }
            }
        }
        Ok(items)
    }

    fn name(&self) -> &'static str {
        "Reddit"
    }

    fn timeout(&self) -> std::time::Duration {
        // Two sequential subreddit searches.
        std::time::Duration::from_secs(10)
    }
}
