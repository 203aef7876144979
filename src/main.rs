//! Content Aggregation Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use std::sync::Arc;

use anyhow::Context;
use tower_http::services::ServeDir;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tech_content_aggregator::config::EngineConfig;
use tech_content_aggregator::curated::CuratedPool;
use tech_content_aggregator::metrics::Metrics;
use tech_content_aggregator::{api, service, ContentService};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = EngineConfig::load_default()?;

    let pool = Arc::new(CuratedPool::builtin());
    pool.validate().context("curated pool misconfigured")?;
    let metrics = Metrics::init(&pool);

    let deps = service::live_deps(&cfg, Arc::clone(&pool))?;
    let generated_dir = cfg.generated_dir.clone();
    let generated_prefix = cfg.generated_prefix.clone();
    let bind_addr = cfg.bind_addr.clone();

    let state = api::AppState {
        service: Arc::new(ContentService::new(cfg, deps)),
    };
    let app = api::router(state)
        .merge(metrics.router())
        .nest_service(&generated_prefix, ServeDir::new(&generated_dir));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "content service listening");
    axum::serve(listener, app).await.context("serving http")?;
    Ok(())
}
