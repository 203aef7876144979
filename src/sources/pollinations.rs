// src/sources/pollinations.rs
//! Pollinations.ai generator source. No network call at fetch time: it
//! emits deterministic generation URLs per (query, index); the actual image
//! is produced server-side when the materialize step downloads the URL.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use url::Url;

use crate::content::{ContentItem, Query};
use crate::sources::Source;

const BASE_URL: &str = "https://image.pollinations.ai";
const SOURCE_NAME: &str = "Pollinations.ai (Stable Diffusion)";
const IMAGE_SIZE: u32 = 512;

/// Stable seed per (query, index) so regenerating the same request yields
/// the same images.
pub fn generation_seed(query: &str, index: usize) -> u32 {
    let digest = Sha256::digest(format!("{query}_{index}").as_bytes());
    let raw = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    raw % 1_000_000
}

/// Percent-encoded generation URL for one prompt variation.
pub fn generation_url(query: &str, index: usize) -> Result<String> {
    let prompt = format!(
        "{query}, high quality, detailed, professional, masterpiece, variation {}",
        index + 1
    );
    let mut url = Url::parse(BASE_URL).context("parsing pollinations base url")?;
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("pollinations base url cannot be a base"))?
        .push("prompt")
        .push(&prompt);
    url.query_pairs_mut()
        .append_pair("seed", &generation_seed(query, index).to_string())
        .append_pair("width", &IMAGE_SIZE.to_string())
        .append_pair("height", &IMAGE_SIZE.to_string());
    Ok(url.to_string())
}

pub struct PollinationsSource;

#[async_trait]
impl Source for PollinationsSource {
    async fn fetch(&self, query: &Query) -> Result<Vec<ContentItem>> {
        let count = query.count.max(1);
        let mut items = Vec::with_capacity(count);
        for i in 0..count {
            let url = generation_url(&query.text, i)?;
            let mut item = ContentItem::text(
                format!("AI Generated: {} (variation {})", query.text, i + 1),
                format!("Generated image for '{}'.", query.text),
            );
            item.url = Some(url.clone());
            item.thumbnail = Some(url.clone());
            item.source = Some(SOURCE_NAME.to_string());
            item.source_url = Some(url);
            item.author = Some("AI Generated".to_string());
            item.width = Some(IMAGE_SIZE);
            item.height = Some(IMAGE_SIZE);
            items.push(item);
        }
        Ok(items)
    }

    fn name(&self) -> &'static str {
        "Pollinations.ai"
    }

    fn timeout(&self) -> Duration {
        // Generation happens lazily, but the budget stays generous in case a
        // future probe touches these URLs.
        Duration::from_secs(30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Domain;

    #[test]
    fn seeds_are_deterministic_and_vary_by_index() {
        assert_eq!(generation_seed("butterfly", 0), generation_seed("butterfly", 0));
        assert_ne!(generation_seed("butterfly", 0), generation_seed("butterfly", 1));
        assert!(generation_seed("butterfly", 0) < 1_000_000);
    }

    #[test]
    fn urls_are_percent_encoded() {
        let url = generation_url("red butterfly", 0).unwrap();
        assert!(url.starts_with("https://image.pollinations.ai/prompt/"));
        assert!(!url.contains(' '));
        assert!(url.contains("width=512"));
        assert!(url.contains("seed="));
    }

    #[tokio::test]
    async fn fetch_emits_count_distinct_candidates() {
        let src = PollinationsSource;
        let out = src
            .fetch(&Query::new("butterfly", Domain::Image, 6))
            .await
            .unwrap();
        assert_eq!(out.len(), 6);
        let mut urls: Vec<&str> = out.iter().filter_map(|i| i.url.as_deref()).collect();
        let before = urls.len();
        urls.sort();
        urls.dedup();
        assert_eq!(urls.len(), before, "candidate urls must be distinct");
        assert!(out[0].title.contains("butterfly"));
    }
}
