// src/aggregate.rs
//! Multi-source aggregation: fan-out with per-source timeouts, merge in
//! priority order, dedupe, validate, and top up from the curated pool so
//! the candidate list is never empty.

use std::sync::Arc;

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::content::{ContentItem, Domain, Query};
use crate::curated::{CuratedPool, CURATED_SOURCE_NAME};
use crate::dedupe::dedupe;
use crate::sources::Source;
use crate::validate::Validator;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("aggregate_items_total", "Items returned by sources.");
        describe_counter!(
            "aggregate_source_errors_total",
            "Source fetch failures, contained per source."
        );
        describe_counter!(
            "aggregate_source_timeouts_total",
            "Source fetches cut off by their timeout."
        );
        describe_counter!("aggregate_dedup_total", "Items removed as duplicates.");
        describe_counter!(
            "aggregate_rejected_total",
            "Items rejected by validation."
        );
        describe_counter!(
            "aggregate_curated_fill_total",
            "Curated items appended below the validated minimum."
        );
    });
}

pub struct Aggregator {
    validator: Validator,
    pool: Arc<CuratedPool>,
    /// Below this many validated candidates the curated pool tops up.
    min_validated: usize,
}

impl Aggregator {
    pub fn new(validator: Validator, pool: Arc<CuratedPool>, min_validated: usize) -> Self {
        Self {
            validator,
            pool,
            min_validated,
        }
    }

    /// Merge candidates from `sources` for `query`, at most `max_results`.
    ///
    /// News and images fan out concurrently (one task per source, each with
    /// its own timeout); facts walk sources sequentially with early exit.
    /// Results concatenate in configured source order — priority reflects
    /// trust, not arrival time. Never returns empty for a valid pool.
    pub async fn aggregate(
        &self,
        query: &Query,
        sources: &[Arc<dyn Source>],
        max_results: usize,
    ) -> Vec<ContentItem> {
        ensure_metrics_described();

        let raw = match query.domain {
            Domain::Fact => self.fetch_sequential(query, sources, max_results).await,
            Domain::News | Domain::Image => self.fetch_concurrent(query, sources).await,
        };
        counter!("aggregate_items_total").increment(raw.len() as u64);

        let before = raw.len();
        let unique = dedupe(query.domain, raw);
        counter!("aggregate_dedup_total").increment((before - unique.len()) as u64);

        let mut accepted = Vec::with_capacity(unique.len().min(max_results));
        let mut rejected = 0usize;
        for item in unique {
            if accepted.len() >= max_results {
                break;
            }
            // Curated items are pre-vetted; everything else earns its place.
            let pre_vetted = item.source.as_deref() == Some(CURATED_SOURCE_NAME);
            if pre_vetted || self.validator.accept(&item, query).await {
                accepted.push(item);
            } else {
                rejected += 1;
            }
        }
        counter!("aggregate_rejected_total").increment(rejected as u64);

        if accepted.len() < self.min_validated {
            let mut filled = 0usize;
            for item in self.pool.items_for(query.domain, &query.text) {
                if accepted.len() >= max_results {
                    break;
                }
                let key = item.identity_key(query.domain);
                if accepted
                    .iter()
                    .any(|a| a.identity_key(query.domain) == key)
                {
                    continue;
                }
                accepted.push(item);
                filled += 1;
            }
            counter!("aggregate_curated_fill_total").increment(filled as u64);
        }

        info!(
            target: "aggregate",
            domain = ?query.domain,
            candidates = accepted.len(),
            "aggregation complete"
        );
        accepted
    }

    /// One task per source; slow or hanging sources cannot block the batch.
    /// Collection order follows the configured source order, so a later-
    /// arriving high-priority source still sorts first.
    async fn fetch_concurrent(
        &self,
        query: &Query,
        sources: &[Arc<dyn Source>],
    ) -> Vec<ContentItem> {
        let mut handles = Vec::with_capacity(sources.len());
        for source in sources {
            let source = Arc::clone(source);
            let query = query.clone();
            let budget = source.timeout();
            handles.push((
                source.name(),
                tokio::spawn(async move { timeout(budget, source.fetch(&query)).await }),
            ));
        }

        let mut merged = Vec::new();
        for (name, handle) in handles {
            match handle.await {
                Ok(Ok(Ok(mut items))) => merged.append(&mut items),
                Ok(Ok(Err(e))) => {
                    warn!(target: "aggregate", source = name, error = ?e, "source failed");
                    counter!("aggregate_source_errors_total").increment(1);
                }
                Ok(Err(_elapsed)) => {
                    warn!(target: "aggregate", source = name, "source timed out");
                    counter!("aggregate_source_timeouts_total").increment(1);
                }
                Err(e) => {
                    warn!(target: "aggregate", source = name, error = ?e, "source task panicked");
                    counter!("aggregate_source_errors_total").increment(1);
                }
            }
        }
        merged
    }

    /// Walk sources in priority order and stop once one yields enough.
    async fn fetch_sequential(
        &self,
        query: &Query,
        sources: &[Arc<dyn Source>],
        max_results: usize,
    ) -> Vec<ContentItem> {
        let mut merged = Vec::new();
        for source in sources {
            match timeout(source.timeout(), source.fetch(query)).await {
                Ok(Ok(mut items)) => merged.append(&mut items),
                Ok(Err(e)) => {
                    warn!(target: "aggregate", source = source.name(), error = ?e, "source failed");
                    counter!("aggregate_source_errors_total").increment(1);
                }
                Err(_elapsed) => {
                    warn!(target: "aggregate", source = source.name(), "source timed out");
                    counter!("aggregate_source_timeouts_total").increment(1);
                }
            }
            if merged.len() >= max_results {
                break;
            }
        }
        merged
    }
}
