// src/validate.rs
//! Candidate validation: structural checks, media reachability via an
//! injected probe, and query relevance. Checks short-circuit in that order
//! so a structural rejection never spends a probe call.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::content::{ContentItem, Domain, Query};

/// Media references below this size are treated as placeholders.
pub const MIN_MEDIA_BYTES: u64 = 5_000;

const ACCEPTED_MEDIA_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Outcome of probing one media reference.
#[derive(Debug, Clone)]
pub struct ProbeInfo {
    pub reachable: bool,
    pub content_type: String,
    pub size_bytes: Option<u64>,
}

/// Reachability capability consumed by the validator. Implemented over HTTP
/// in production, stubbed in tests.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn check(&self, media_ref: &str) -> Result<ProbeInfo>;
}

/// HEAD-request probe with a short timeout.
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("tech-content-aggregator/0.1")
            .timeout(Duration::from_secs(5))
            .build()
            .context("building probe http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn check(&self, media_ref: &str) -> Result<ProbeInfo> {
        let resp = self
            .client
            .head(media_ref)
            .send()
            .await
            .with_context(|| format!("probing {media_ref}"))?;

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let size_bytes = resp
            .headers()
            .get(reqwest::header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        Ok(ProbeInfo {
            reachable: resp.status().is_success(),
            content_type,
            size_bytes,
        })
    }
}

/// Lowercased query tokens long enough to carry relevance on their own.
/// Tokens of length <= 2 are never sufficient (avoids "a", "to", "it").
pub fn relevance_tokens(text: &str) -> Vec<String> {
    static RE: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re = RE.get_or_init(|| regex::Regex::new(r"(?u)\b\w+\b").expect("token regex"));
    re.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|t| t.chars().count() > 2)
        .collect()
}

pub struct Validator {
    probe: Arc<dyn Probe>,
}

impl Validator {
    pub fn new(probe: Arc<dyn Probe>) -> Self {
        Self { probe }
    }

    /// Accept or reject one candidate against the originating query.
    pub async fn accept(&self, item: &ContentItem, query: &Query) -> bool {
        // 1) Structural
        if item.title.trim().is_empty() {
            debug!(target: "validate", "rejected: empty title");
            return false;
        }
        if query.domain == Domain::Image && item.url.as_deref().unwrap_or("").is_empty() {
            debug!(target: "validate", title = %item.title, "rejected: missing media reference");
            return false;
        }

        // 2) Reachability (media-bearing domains only)
        if query.domain == Domain::Image {
            let media_ref = item.url.as_deref().expect("checked above");
            let info = match self.probe.check(media_ref).await {
                Ok(info) => info,
                Err(e) => {
                    debug!(target: "validate", media_ref, error = ?e, "rejected: probe failed");
                    return false;
                }
            };
            if !info.reachable {
                debug!(target: "validate", media_ref, "rejected: not reachable");
                return false;
            }
            if !ACCEPTED_MEDIA_TYPES
                .iter()
                .any(|t| info.content_type.contains(t))
            {
                debug!(target: "validate", media_ref, content_type = %info.content_type, "rejected: content type");
                return false;
            }
            if let Some(size) = info.size_bytes {
                if size < MIN_MEDIA_BYTES {
                    debug!(target: "validate", media_ref, size, "rejected: below size threshold");
                    return false;
                }
            }
        }

        // 3) Relevance. A query with no token longer than 2 chars has nothing
        // to match against and passes vacuously (the news domain's case).
        let tokens = relevance_tokens(&query.text);
        if !tokens.is_empty() {
            let title = item.title.to_lowercase();
            if !tokens.iter().any(|t| title.contains(t.as_str())) {
                debug!(target: "validate", title = %item.title, "rejected: not relevant");
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe(ProbeInfo);

    #[async_trait]
    impl Probe for FixedProbe {
        async fn check(&self, _media_ref: &str) -> Result<ProbeInfo> {
            Ok(self.0.clone())
        }
    }

    struct PanickingProbe;

    #[async_trait]
    impl Probe for PanickingProbe {
        async fn check(&self, _media_ref: &str) -> Result<ProbeInfo> {
            panic!("probe must not be called after a structural rejection");
        }
    }

    fn ok_probe() -> Arc<dyn Probe> {
        Arc::new(FixedProbe(ProbeInfo {
            reachable: true,
            content_type: "image/jpeg".into(),
            size_bytes: Some(100_000),
        }))
    }

    fn image_query(text: &str) -> Query {
        Query::new(text, Domain::Image, 6)
    }

    fn image_item(title: &str) -> ContentItem {
        let mut it = ContentItem::text(title, "desc");
        it.url = Some("https://img.example.com/x.jpg".into());
        it
    }

    #[tokio::test]
    async fn accepts_relevant_reachable_image() {
        let v = Validator::new(ok_probe());
        assert!(v.accept(&image_item("Butterfly on a leaf"), &image_query("butterfly")).await);
    }

    #[tokio::test]
    async fn rejects_title_without_long_query_tokens() {
        let v = Validator::new(ok_probe());
        assert!(!v.accept(&image_item("Sunset over water"), &image_query("butterfly")).await);
    }

    #[tokio::test]
    async fn short_tokens_are_never_sufficient() {
        let v = Validator::new(ok_probe());
        // "of" appears in the title but is too short to establish relevance;
        // no other token survives, so the check passes vacuously.
        assert!(v.accept(&image_item("Portrait of nobody"), &image_query("of it")).await);
        // With a long token present, the short ones still don't help.
        assert!(!v.accept(&image_item("Portrait of nobody"), &image_query("of butterfly")).await);
    }

    #[tokio::test]
    async fn rejects_undersized_media_regardless_of_relevance() {
        let v = Validator::new(Arc::new(FixedProbe(ProbeInfo {
            reachable: true,
            content_type: "image/png".into(),
            size_bytes: Some(1_200),
        })));
        assert!(!v.accept(&image_item("Butterfly macro"), &image_query("butterfly")).await);
    }

    #[tokio::test]
    async fn rejects_non_image_content_type() {
        let v = Validator::new(Arc::new(FixedProbe(ProbeInfo {
            reachable: true,
            content_type: "text/html".into(),
            size_bytes: Some(100_000),
        })));
        assert!(!v.accept(&image_item("Butterfly page"), &image_query("butterfly")).await);
    }

    #[tokio::test]
    async fn structural_rejection_skips_probe() {
        let v = Validator::new(Arc::new(PanickingProbe));
        let mut no_media = ContentItem::text("Butterfly", "desc");
        no_media.url = None;
        assert!(!v.accept(&no_media, &image_query("butterfly")).await);
        assert!(!v.accept(&image_item("   "), &image_query("butterfly")).await);
    }

    #[tokio::test]
    async fn text_domains_skip_probe_entirely() {
        let v = Validator::new(Arc::new(PanickingProbe));
        let item = ContentItem::text("🔥 Rust 2.0 announced", "big news");
        let q = Query::new("rust", Domain::News, 1);
        assert!(v.accept(&item, &q).await);
    }

    #[test]
    fn relevance_tokens_drop_short_words() {
        assert_eq!(relevance_tokens("a to butterfly IT"), vec!["butterfly"]);
        assert!(relevance_tokens("a to it").is_empty());
    }
}
