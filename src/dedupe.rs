// src/dedupe.rs
//! Order-preserving deduplication by identity key. Pure, no I/O.

use std::collections::HashSet;

use crate::content::{ContentItem, Domain};

/// Keep the first occurrence of each identity key, drop later duplicates.
/// Stable: surviving items keep their relative order. Idempotent.
pub fn dedupe(domain: Domain, items: Vec<ContentItem>) -> Vec<ContentItem> {
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(item.identity_key(domain).to_string()) {
            out.push(item);
        }
    }
    out
}
