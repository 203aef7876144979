// src/service.rs
//! The facade tying aggregation, validation, and novelty tracking together.
//! One instance per process; request handlers borrow it through `Arc`.

use std::sync::Arc;

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::{info, warn};

use crate::aggregate::Aggregator;
use crate::config::EngineConfig;
use crate::content::{ContentItem, Domain, Query};
use crate::curated::CuratedPool;
use crate::materialize::{suggested_name, Materializer};
use crate::novelty::NoveltyTracker;
use crate::rng::SharedRng;
use crate::session::SessionStore;
use crate::sources::Source;
use crate::validate::{Probe, Validator};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("query must not be empty")]
    EmptyQuery,
    #[error("no images could be materialized")]
    AllImagesFailed,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Everything the service consumes through a seam. Production wiring and
/// tests build the same struct with different implementations.
pub struct ServiceDeps {
    pub pool: Arc<CuratedPool>,
    pub fact_sources: Vec<Arc<dyn Source>>,
    pub news_sources: Vec<Arc<dyn Source>>,
    pub image_sources: Vec<Arc<dyn Source>>,
    pub probe: Arc<dyn Probe>,
    pub materializer: Arc<dyn Materializer>,
    pub sessions: Arc<dyn SessionStore>,
    pub rng: Arc<SharedRng>,
}

#[derive(Debug)]
pub struct ImageSearchResult {
    pub query: String,
    pub images: Vec<ContentItem>,
}

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "images_materialized_total",
            "Images downloaded and persisted."
        );
        describe_counter!(
            "images_materialize_failed_total",
            "Per-image materialize failures (item skipped)."
        );
    });
}

pub struct ContentService {
    cfg: EngineConfig,
    pool: Arc<CuratedPool>,
    aggregator: Aggregator,
    facts_tracker: NoveltyTracker,
    news_tracker: NoveltyTracker,
    fact_sources: Vec<Arc<dyn Source>>,
    news_sources: Vec<Arc<dyn Source>>,
    image_sources: Vec<Arc<dyn Source>>,
    materializer: Arc<dyn Materializer>,
    rng: Arc<SharedRng>,
}

impl ContentService {
    pub fn new(cfg: EngineConfig, deps: ServiceDeps) -> Self {
        ensure_metrics_described();
        let aggregator = Aggregator::new(
            Validator::new(deps.probe),
            Arc::clone(&deps.pool),
            cfg.min_validated,
        );
        let facts_tracker = NoveltyTracker::new(
            Arc::clone(&deps.sessions),
            Arc::clone(&deps.rng),
            Domain::Fact,
            "recent_facts",
            cfg.facts_window,
            cfg.max_attempts,
        );
        let news_tracker = NoveltyTracker::new(
            Arc::clone(&deps.sessions),
            Arc::clone(&deps.rng),
            Domain::News,
            "recent_news",
            cfg.news_window,
            cfg.max_attempts,
        );
        Self {
            cfg,
            pool: deps.pool,
            aggregator,
            facts_tracker,
            news_tracker,
            fact_sources: deps.fact_sources,
            news_sources: deps.news_sources,
            image_sources: deps.image_sources,
            materializer: deps.materializer,
            rng: deps.rng,
        }
    }

    /// One tech/AI fact the consumer has not seen recently.
    pub async fn get_fact(&self, consumer: &str) -> ContentItem {
        let query = Query::new("", Domain::Fact, 1);
        let max_results = self.pool.facts().len().max(self.cfg.min_validated);
        let candidates = self
            .aggregator
            .aggregate(&query, &self.fact_sources, max_results)
            .await;

        match self.facts_tracker.pick(consumer, &candidates) {
            Some(item) => item,
            None => {
                // Unreachable for a validated pool; answer anyway.
                let item = self.pool.sample(Domain::Fact, "", &self.rng);
                self.facts_tracker.record(consumer, &item);
                item
            }
        }
    }

    /// One recent tech news item, live sources first, curated as backstop.
    pub async fn get_news(&self, consumer: &str) -> ContentItem {
        let query = Query::new("", Domain::News, 1);
        let candidates = self
            .aggregator
            .aggregate(&query, &self.news_sources, self.cfg.news_max_results)
            .await;

        match self.news_tracker.pick(consumer, &candidates) {
            Some(item) => item,
            None => {
                // Total aggregation failure: serve the curated pool directly.
                warn!(target: "service", "news aggregation empty, using curated pool directly");
                let item = self.pool.sample(Domain::News, "", &self.rng);
                self.news_tracker.record(consumer, &item);
                item
            }
        }
    }

    /// Up to `count` images for `query`, each materialized to a local
    /// reference. Images are deduplicated within the request only; no
    /// cross-request novelty window.
    pub async fn get_images(
        &self,
        query: &str,
        count: Option<usize>,
    ) -> Result<ImageSearchResult, ServiceError> {
        let text = query.trim();
        if text.is_empty() {
            return Err(ServiceError::EmptyQuery);
        }
        let count = count
            .unwrap_or(self.cfg.default_image_count)
            .clamp(1, self.cfg.max_image_count);

        let query = Query::new(text, Domain::Image, count);
        let candidates = self
            .aggregator
            .aggregate(&query, &self.image_sources, count)
            .await;

        let mut images = Vec::with_capacity(candidates.len());
        for (i, candidate) in candidates.into_iter().enumerate() {
            let Some(remote) = candidate.url.clone() else {
                continue;
            };
            let name = suggested_name(&query.text, i);
            match self.materializer.materialize(&remote, &name).await {
                Ok(local) => {
                    counter!("images_materialized_total").increment(1);
                    let mut item = candidate;
                    item.url = Some(local.clone());
                    item.thumbnail = Some(local);
                    images.push(item);
                }
                Err(e) => {
                    // One bad image never aborts the batch.
                    counter!("images_materialize_failed_total").increment(1);
                    warn!(target: "service", url = %remote, error = ?e, "materialize failed, skipping image");
                }
            }
        }

        if images.is_empty() {
            return Err(ServiceError::AllImagesFailed);
        }
        info!(target: "service", query = %query.text, count = images.len(), "images served");
        Ok(ImageSearchResult {
            query: query.text,
            images,
        })
    }
}

/// Production wiring: real providers in priority order, HTTP probe and
/// materializer, in-memory sessions, entropy-seeded RNG.
pub fn live_deps(cfg: &EngineConfig, pool: Arc<CuratedPool>) -> anyhow::Result<ServiceDeps> {
    use crate::materialize::HttpMaterializer;
    use crate::session::InMemorySessionStore;
    use crate::sources::curated::CuratedSource;
    use crate::sources::dev_to::DevToSource;
    use crate::sources::github_trending::GithubTrendingSource;
    use crate::sources::hacker_news::HackerNewsSource;
    use crate::sources::policy_news::PolicyNewsSource;
    use crate::sources::pollinations::PollinationsSource;
    use crate::sources::reddit::RedditSource;
    use crate::sources::unsplash::UnsplashSource;
    use crate::sources::wikimedia::WikimediaSource;
    use crate::validate::HttpProbe;

    let rng = Arc::new(SharedRng::from_entropy());

    // Facts stay curated-only: external fact lookups proved unreliable and
    // the local table always answers.
    let fact_sources: Vec<Arc<dyn Source>> = vec![Arc::new(CuratedSource::new(
        Arc::clone(&pool),
        Arc::clone(&rng),
    ))];

    let news_sources: Vec<Arc<dyn Source>> = vec![
        Arc::new(HackerNewsSource::new(Arc::clone(&rng))?),
        Arc::new(GithubTrendingSource::new(Arc::clone(&rng))?),
        Arc::new(DevToSource::new(Arc::clone(&rng))?),
        Arc::new(PolicyNewsSource::new(Arc::clone(&pool), Arc::clone(&rng))),
    ];

    let image_sources: Vec<Arc<dyn Source>> = vec![
        Arc::new(UnsplashSource::new()?),
        Arc::new(RedditSource::new()?),
        Arc::new(WikimediaSource::new()?),
        Arc::new(PollinationsSource),
    ];

    Ok(ServiceDeps {
        pool,
        fact_sources,
        news_sources,
        image_sources,
        probe: Arc::new(HttpProbe::new()?),
        materializer: Arc::new(HttpMaterializer::new(
            &cfg.generated_dir,
            &cfg.generated_prefix,
        )?),
        sessions: Arc::new(InMemorySessionStore::new()),
        rng,
    })
}
