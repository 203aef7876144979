// tests/common/mod.rs
// Shared stubs for integration tests: deterministic sources, an accept-all
// probe, and a filesystem-free materializer.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use tech_content_aggregator::content::{ContentItem, Query};
use tech_content_aggregator::curated::CuratedPool;
use tech_content_aggregator::materialize::Materializer;
use tech_content_aggregator::rng::SharedRng;
use tech_content_aggregator::service::ServiceDeps;
use tech_content_aggregator::session::InMemorySessionStore;
use tech_content_aggregator::sources::curated::CuratedSource;
use tech_content_aggregator::sources::Source;
use tech_content_aggregator::validate::{Probe, ProbeInfo};

pub fn image_item(url: &str, title: &str) -> ContentItem {
    let mut item = ContentItem::text(title, "test image");
    item.url = Some(url.to_string());
    item.thumbnail = Some(url.to_string());
    item.source = Some("Test".to_string());
    item
}

pub fn news_item(title: &str, url: &str) -> ContentItem {
    let mut item = ContentItem::text(title, "test news");
    item.url = Some(url.to_string());
    item.source = Some("Test".to_string());
    item
}

/// Source returning a fixed item list, optionally after a delay.
pub struct StaticSource {
    pub name: &'static str,
    pub items: Vec<ContentItem>,
    pub delay: Duration,
    pub budget: Duration,
}

impl StaticSource {
    pub fn new(name: &'static str, items: Vec<ContentItem>) -> Self {
        Self {
            name,
            items,
            delay: Duration::ZERO,
            budget: Duration::from_secs(5),
        }
    }

    pub fn delayed(name: &'static str, items: Vec<ContentItem>, delay: Duration) -> Self {
        Self {
            name,
            items,
            delay,
            budget: Duration::from_secs(5),
        }
    }

    /// A source whose own delay exceeds its budget, so the aggregator must
    /// cut it off.
    pub fn hanging(name: &'static str) -> Self {
        Self {
            name,
            items: vec![image_item("https://hang.example.com/x.jpg", name)],
            delay: Duration::from_secs(30),
            budget: Duration::from_millis(50),
        }
    }
}

#[async_trait]
impl Source for StaticSource {
    async fn fetch(&self, _query: &Query) -> Result<Vec<ContentItem>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.items.clone())
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn timeout(&self) -> Duration {
        self.budget
    }
}

/// Source that always fails.
pub struct FailingSource(pub &'static str);

#[async_trait]
impl Source for FailingSource {
    async fn fetch(&self, _query: &Query) -> Result<Vec<ContentItem>> {
        Err(anyhow!("{} is down", self.0))
    }

    fn name(&self) -> &'static str {
        self.0
    }
}

/// Source counting how often it was invoked.
pub struct CountingSource {
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Source for CountingSource {
    async fn fetch(&self, _query: &Query) -> Result<Vec<ContentItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

/// Probe that accepts everything as a large jpeg.
pub struct AcceptAllProbe;

#[async_trait]
impl Probe for AcceptAllProbe {
    async fn check(&self, _media_ref: &str) -> Result<ProbeInfo> {
        Ok(ProbeInfo {
            reachable: true,
            content_type: "image/jpeg".into(),
            size_bytes: Some(100_000),
        })
    }
}

/// Materializer that never touches disk or network. URLs containing "fail"
/// simulate a per-item download failure.
pub struct StubMaterializer;

#[async_trait]
impl Materializer for StubMaterializer {
    async fn materialize(&self, url: &str, suggested_name: &str) -> Result<String> {
        if url.contains("fail") {
            return Err(anyhow!("simulated download failure for {url}"));
        }
        Ok(format!("/static/generated_images/{suggested_name}"))
    }
}

/// Baseline deps: builtin pool, curated-only facts, no news/image sources,
/// accept-all probe, stub materializer, seeded RNG.
pub fn base_deps(seed: u64) -> ServiceDeps {
    let pool = Arc::new(CuratedPool::builtin());
    let rng = Arc::new(SharedRng::seeded(seed));
    let fact_sources: Vec<Arc<dyn Source>> = vec![Arc::new(CuratedSource::new(
        Arc::clone(&pool),
        Arc::clone(&rng),
    ))];
    ServiceDeps {
        pool,
        fact_sources,
        news_sources: Vec::new(),
        image_sources: Vec::new(),
        probe: Arc::new(AcceptAllProbe),
        materializer: Arc::new(StubMaterializer),
        sessions: Arc::new(InMemorySessionStore::new()),
        rng,
    }
}
