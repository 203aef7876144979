// src/novelty.rs
//! Bounded per-consumer recency windows and the repeat-avoiding draw loop.
//!
//! One tracker instance covers one domain (facts K=5, news K=10). Windows
//! live behind the `SessionStore` seam; the tracker owns per-consumer locks
//! so concurrent requests from one consumer cannot lose updates.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use metrics::counter;
use tracing::debug;

use crate::content::{ContentItem, Domain};
use crate::rng::SharedRng;
use crate::session::SessionStore;

pub struct NoveltyTracker {
    store: Arc<dyn SessionStore>,
    rng: Arc<SharedRng>,
    domain: Domain,
    window_key: &'static str,
    capacity: usize,
    max_attempts: usize,
    /// One lock per consumer ever seen; grows with distinct consumers and
    /// is never pruned, same lifetime as the backing session entries.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl NoveltyTracker {
    pub fn new(
        store: Arc<dyn SessionStore>,
        rng: Arc<SharedRng>,
        domain: Domain,
        window_key: &'static str,
        capacity: usize,
        max_attempts: usize,
    ) -> Self {
        Self {
            store,
            rng,
            domain,
            window_key,
            capacity,
            max_attempts,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Draw one candidate not in the consumer's recent window, recording it.
    ///
    /// Up to `max_attempts` uniform draws; on exhaustion the last draw is
    /// accepted anyway (a repeat beats a failed request). When the window
    /// already covers every candidate key, it is reset first so future
    /// requests regain full freedom.
    pub fn pick(&self, consumer: &str, candidates: &[ContentItem]) -> Option<ContentItem> {
        if candidates.is_empty() {
            return None;
        }
        let guard = self.consumer_lock(consumer);
        let _held = guard.lock().expect("novelty consumer lock poisoned");

        let mut window = self
            .store
            .get(consumer, self.window_key)
            .unwrap_or_default();

        let mut last_idx = 0;
        for _ in 0..self.max_attempts {
            let idx = self.rng.pick_index(candidates.len());
            last_idx = idx;
            let key = candidates[idx].identity_key(self.domain);
            if !window.iter().any(|k| k == key) {
                self.push_and_store(consumer, &mut window, key);
                return Some(candidates[idx].clone());
            }
        }

        // All draws collided. If the window covers the whole pool, reset it.
        let total_collision = candidates
            .iter()
            .all(|c| window.iter().any(|k| k == c.identity_key(self.domain)));
        if total_collision {
            debug!(target: "novelty", consumer, key = self.window_key, "window covers pool, resetting");
            counter!("novelty_window_resets_total").increment(1);
            window.clear();
        }

        let chosen = &candidates[last_idx];
        let key = chosen.identity_key(self.domain).to_string();
        self.push_and_store(consumer, &mut window, &key);
        Some(chosen.clone())
    }

    /// Record an item as served without drawing (direct-fallback paths).
    pub fn record(&self, consumer: &str, item: &ContentItem) {
        let guard = self.consumer_lock(consumer);
        let _held = guard.lock().expect("novelty consumer lock poisoned");
        let mut window = self
            .store
            .get(consumer, self.window_key)
            .unwrap_or_default();
        let key = item.identity_key(self.domain).to_string();
        self.push_and_store(consumer, &mut window, &key);
    }

    fn push_and_store(&self, consumer: &str, window: &mut Vec<String>, key: &str) {
        window.push(key.to_string());
        if window.len() > self.capacity {
            let excess = window.len() - self.capacity;
            window.drain(0..excess);
        }
        self.store.set(consumer, self.window_key, window.clone());
    }

    fn consumer_lock(&self, consumer: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().expect("novelty lock table poisoned");
        locks
            .entry(consumer.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
