// src/sources/policy_news.rs
//! IT-policy news provider. Backed by the curated policy table rather than
//! an external API; still behaves like any other source so the aggregator
//! treats it uniformly.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::content::{ContentItem, Query};
use crate::curated::CuratedPool;
use crate::rng::SharedRng;
use crate::sources::Source;

pub struct PolicyNewsSource {
    pool: Arc<CuratedPool>,
    rng: Arc<SharedRng>,
}

impl PolicyNewsSource {
    pub fn new(pool: Arc<CuratedPool>, rng: Arc<SharedRng>) -> Self {
        Self { pool, rng }
    }
}

#[async_trait]
impl Source for PolicyNewsSource {
    async fn fetch(&self, _query: &Query) -> Result<Vec<ContentItem>> {
        let table = self.pool.policy_news();
        let item = table[self.rng.pick_index(table.len())].clone();
        Ok(vec![item])
    }

    fn name(&self) -> &'static str {
        "IT Policy"
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Domain;

    #[tokio::test]
    async fn returns_one_policy_item() {
        let src = PolicyNewsSource::new(
            Arc::new(CuratedPool::builtin()),
            Arc::new(SharedRng::seeded(11)),
        );
        let out = src.fetch(&Query::new("", Domain::News, 1)).await.unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].url.is_some());
    }
}
