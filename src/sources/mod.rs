// src/sources/mod.rs
//! Upstream content sources. Each provider encapsulates its own transport
//! and result-to-item mapping; faults never escape `fetch` uncaught — the
//! aggregator sees them only as an `Err` marker.

pub mod curated;
pub mod dev_to;
pub mod github_trending;
pub mod hacker_news;
pub mod policy_news;
pub mod pollinations;
pub mod reddit;
pub mod unsplash;
pub mod wikimedia;

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::content::{ContentItem, Query};

#[async_trait]
pub trait Source: Send + Sync {
    /// Fetch candidates for a query. Zero items is a valid outcome.
    async fn fetch(&self, query: &Query) -> Result<Vec<ContentItem>>;

    fn name(&self) -> &'static str;

    /// Per-source fetch budget; the aggregator cuts the task off after this.
    fn timeout(&self) -> Duration {
        Duration::from_secs(5)
    }
}

/// Shared client settings for HTTP-backed providers.
pub(crate) fn provider_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
        )
        .timeout(Duration::from_secs(10))
        .build()
        .context("building provider http client")
}
