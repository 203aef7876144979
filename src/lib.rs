// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod aggregate;
pub mod api;
pub mod config;
pub mod content;
pub mod curated;
pub mod dedupe;
pub mod materialize;
pub mod metrics;
pub mod novelty;
pub mod rng;
pub mod service;
pub mod session;
pub mod sources;
pub mod validate;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::content::{ContentItem, Domain, Query};
pub use crate::service::{ContentService, ServiceDeps, ServiceError};
