// src/content.rs
//! Core data model: domains, queries, and the immutable `ContentItem`.

use serde::{Deserialize, Serialize};

/// Which kind of content a request is about. Drives identity keys,
/// novelty-window capacities, and the aggregation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Fact,
    News,
    Image,
}

/// A single piece of servable content. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub title: String,
    pub description: String,
    /// Media reference for images, article link for news. Absent for facts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ContentItem {
    /// Minimal text item (facts, curated entries).
    pub fn text(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: None,
            thumbnail: None,
            image_suggestion: None,
            source: None,
            source_url: None,
            author: None,
            width: None,
            height: None,
        }
    }

    /// Stable identity under which duplicates and repeats are detected.
    /// Media items key on the media reference, text items on the title.
    pub fn identity_key(&self, domain: Domain) -> &str {
        match domain {
            Domain::Image => self
                .url
                .as_deref()
                .filter(|u| !u.is_empty())
                .unwrap_or(&self.title),
            Domain::Fact | Domain::News => &self.title,
        }
    }
}

/// A user request against one content domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    pub domain: Domain,
    pub count: usize,
}

impl Query {
    pub fn new(text: impl Into<String>, domain: Domain, count: usize) -> Self {
        Self {
            text: text.into(),
            domain,
            count,
        }
    }
}

/// Normalize provider text: decode HTML entities, strip tags, collapse
/// whitespace, cap length.
pub fn normalize_text(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").expect("tag regex"));
    out = re_tags.replace_all(&out, "").to_string();

    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").expect("whitespace regex"));
    out = re_ws.replace_all(&out, " ").to_string();
    out = out.trim().to_string();

    // Length cap: 1500 chars
    if out.chars().count() > 1500 {
        out = out.chars().take(1500).collect();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_key_is_title_for_text_domains() {
        let mut item = ContentItem::text("Alan Turing", "Father of computer science.");
        item.url = Some("https://example.com/turing".into());
        assert_eq!(item.identity_key(Domain::Fact), "Alan Turing");
        assert_eq!(item.identity_key(Domain::News), "Alan Turing");
    }

    #[test]
    fn identity_key_is_media_ref_for_images() {
        let mut item = ContentItem::text("Butterfly", "A butterfly.");
        item.url = Some("https://img.example.com/b.jpg".into());
        assert_eq!(
            item.identity_key(Domain::Image),
            "https://img.example.com/b.jpg"
        );
    }

    #[test]
    fn image_without_media_ref_falls_back_to_title() {
        let item = ContentItem::text("Butterfly", "A butterfly.");
        assert_eq!(item.identity_key(Domain::Image), "Butterfly");
    }

    #[test]
    fn normalize_strips_tags_and_entities() {
        let s = "  <b>Hello</b>&nbsp;&nbsp; world  ";
        assert_eq!(normalize_text(s), "Hello world");
    }
}
