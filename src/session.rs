// src/session.rs
//! Per-consumer key-value seam backing novelty windows. The engine only
//! needs get/set; a real deployment can put a cookie-backed or external
//! store behind this trait.

use std::collections::HashMap;
use std::sync::Mutex;

pub trait SessionStore: Send + Sync {
    fn get(&self, consumer: &str, key: &str) -> Option<Vec<String>>;
    fn set(&self, consumer: &str, key: &str, value: Vec<String>);
}

/// Process-local store, sufficient for a single-instance deployment.
///
/// Entries are never evicted: memory grows with the number of distinct
/// consumers (each holding a few short key vectors). A deployment facing
/// unbounded consumer churn should put a TTL-capable store behind the
/// trait instead.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    inner: Mutex<HashMap<(String, String), Vec<String>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, consumer: &str, key: &str) -> Option<Vec<String>> {
        let map = self.inner.lock().expect("session store mutex poisoned");
        map.get(&(consumer.to_string(), key.to_string())).cloned()
    }

    fn set(&self, consumer: &str, key: &str, value: Vec<String>) {
        let mut map = self.inner.lock().expect("session store mutex poisoned");
        map.insert((consumer.to_string(), key.to_string()), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_and_isolation_between_consumers() {
        let store = InMemorySessionStore::new();
        assert!(store.get("alice", "recent_facts").is_none());
        store.set("alice", "recent_facts", vec!["a".into()]);
        store.set("bob", "recent_facts", vec!["b".into()]);
        assert_eq!(store.get("alice", "recent_facts").unwrap(), vec!["a"]);
        assert_eq!(store.get("bob", "recent_facts").unwrap(), vec!["b"]);
    }
}
