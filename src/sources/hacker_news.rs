// src/sources/hacker_news.rs
//! Hacker News top-stories provider. Two round trips: the top-story id
//! list, then one randomly chosen story. Only tech-flavored titles pass.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::content::{normalize_text, ContentItem, Query};
use crate::rng::SharedRng;
use crate::sources::{provider_client, Source};
use std::sync::Arc;

const DEFAULT_BASE_URL: &str = "https://hacker-news.firebaseio.com";

const TECH_KEYWORDS: &[&str] = &[
    "ai",
    "python",
    "javascript",
    "react",
    "openai",
    "google",
    "microsoft",
    "apple",
    "programming",
    "developer",
    "tech",
    "software",
    "coding",
    "machine learning",
    "neural",
    "algorithm",
];

#[derive(Debug, Deserialize)]
pub struct Story {
    pub id: u64,
    pub title: Option<String>,
    pub url: Option<String>,
}

/// Keyword gate: a story counts as tech news when any keyword occurs in the
/// lowercased title. Keywords of one or two characters ("ai") must stand
/// alone as a word, otherwise they hide inside unrelated words ("trails").
pub fn is_tech_story(title: &str) -> bool {
    let t = title.to_lowercase();
    TECH_KEYWORDS.iter().any(|kw| {
        if kw.chars().count() > 2 {
            t.contains(kw)
        } else {
            t.split(|c: char| !c.is_alphanumeric()).any(|w| w == *kw)
        }
    })
}

pub fn story_to_item(story: &Story) -> Option<ContentItem> {
    let title = normalize_text(story.title.as_deref().unwrap_or_default());
    if title.is_empty() || !is_tech_story(&title) {
        return None;
    }
    let mut item = ContentItem::text(
        format!("🔥 {title}"),
        format!(
            "Latest from Hacker News: {title}. This story is currently trending \
             among developers and tech professionals worldwide."
        ),
    );
    item.url = Some(
        story
            .url
            .clone()
            .unwrap_or_else(|| format!("https://news.ycombinator.com/item?id={}", story.id)),
    );
    item.source = Some("Hacker News".to_string());
    Some(item)
}

pub struct HackerNewsSource {
    client: reqwest::Client,
    base_url: String,
    rng: Arc<SharedRng>,
}

impl HackerNewsSource {
    pub fn new(rng: Arc<SharedRng>) -> Result<Self> {
        Ok(Self {
            client: provider_client()?,
            base_url: DEFAULT_BASE_URL.to_string(),
            rng,
        })
    }

    #[cfg(test)]
    pub fn with_base_url(rng: Arc<SharedRng>, base_url: String) -> Result<Self> {
        Ok(Self {
            client: provider_client()?,
            base_url,
            rng,
        })
    }
}

#[async_trait]
impl Source for HackerNewsSource {
    async fn fetch(&self, _query: &Query) -> Result<Vec<ContentItem>> {
        let ids: Vec<u64> = self
            .client
            .get(format!("{}/v0/topstories.json", self.base_url))
            .send()
            .await
            .context("fetching hn top stories")?
            .error_for_status()
            .context("hn top stories status")?
            .json()
            .await
            .context("parsing hn top story ids")?;

        let top = &ids[..ids.len().min(10)];
        if top.is_empty() {
            return Ok(Vec::new());
        }
        let story_id = top[self.rng.pick_index(top.len())];

        let story: Story = self
            .client
            .get(format!("{}/v0/item/{story_id}.json", self.base_url))
            .send()
            .await
            .context("fetching hn story")?
            .error_for_status()
            .context("hn story status")?
            .json()
            .await
            .context("parsing hn story")?;

        Ok(story_to_item(&story).into_iter().collect())
    }

    fn name(&self) -> &'static str {
        "Hacker News"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tech_stories_pass_the_keyword_gate() {
        assert!(is_tech_story("OpenAI releases a new model"));
        assert!(is_tech_story("Why I rewrote my blog in JavaScript"));
        assert!(!is_tech_story("The best sourdough recipe of 2024"));
    }

    #[test]
    fn short_keywords_match_whole_words_only() {
        assert!(is_tech_story("AI beats the benchmark again"));
        assert!(is_tech_story("What ai-assisted review gets wrong"));
        // "ai" embedded in another word is not a match.
        assert!(!is_tech_story("My favorite hiking trails"));
        assert!(!is_tech_story("Waiting for the rain in Maine"));
    }

    #[test]
    fn story_maps_to_prefixed_item() {
        let story: Story = serde_json::from_str(
            r#"{"id": 42, "title": "Show HN: A tiny Python profiler", "url": "https://example.com/prof"}"#,
        )
        .unwrap();
        let item = story_to_item(&story).unwrap();
        assert_eq!(item.title, "🔥 Show HN: A tiny Python profiler");
        assert_eq!(item.url.as_deref(), Some("https://example.com/prof"));
        assert!(item.description.contains("Hacker News"));
    }

    #[test]
    fn story_without_url_links_to_the_discussion() {
        let story = Story {
            id: 7,
            title: Some("A neural net in 50 lines".into()),
            url: None,
        };
        let item = story_to_item(&story).unwrap();
        assert_eq!(
            item.url.as_deref(),
            Some("https://news.ycombinator.com/item?id=7")
        );
    }

    #[test]
    fn off_topic_story_is_dropped() {
        let story = Story {
            id: 9,
            title: Some("My favorite hiking trails".into()),
            url: None,
        };
        assert!(story_to_item(&story).is_none());
    }
}
