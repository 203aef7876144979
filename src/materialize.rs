// src/materialize.rs
//! Materializing media: download a candidate's reference and persist it
//! locally, yielding a durable path the front-end can serve. Idempotent per
//! suggested name; files already written stay written.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::debug;

#[async_trait]
pub trait Materializer: Send + Sync {
    /// Fetch `url` and persist it under `suggested_name`, returning the
    /// local reference. One attempt; the caller decides what a failure
    /// means.
    async fn materialize(&self, url: &str, suggested_name: &str) -> Result<String>;
}

/// Deterministic filename per (query, index), so re-running a request
/// overwrites nothing and downloads nothing twice.
pub fn suggested_name(query: &str, index: usize) -> String {
    let digest = Sha256::digest(format!("{query}_{index}").as_bytes());
    let mut hex = String::with_capacity(32);
    for b in digest.iter().take(16) {
        use std::fmt::Write as _;
        let _ = write!(&mut hex, "{b:02x}");
    }
    format!("generated_{hex}.jpg")
}

/// Downloads over HTTP into a static directory served by the web layer.
pub struct HttpMaterializer {
    client: reqwest::Client,
    dir: PathBuf,
    public_prefix: String,
}

impl HttpMaterializer {
    pub fn new(dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating image directory {}", dir.display()))?;
        let client = reqwest::Client::builder()
            .user_agent("tech-content-aggregator/0.1")
            .timeout(Duration::from_secs(30))
            .build()
            .context("building materializer http client")?;
        Ok(Self {
            client,
            dir,
            public_prefix: public_prefix.into(),
        })
    }

    fn public_ref(&self, name: &str) -> String {
        format!("{}/{}", self.public_prefix.trim_end_matches('/'), name)
    }
}

#[async_trait]
impl Materializer for HttpMaterializer {
    async fn materialize(&self, url: &str, suggested_name: &str) -> Result<String> {
        let path = self.dir.join(suggested_name);
        if path.exists() {
            debug!(target: "materialize", name = suggested_name, "already materialized");
            return Ok(self.public_ref(suggested_name));
        }

        let bytes = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("downloading {url}"))?
            .error_for_status()
            .context("download status")?
            .bytes()
            .await
            .context("reading download body")?;

        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(self.public_ref(suggested_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggested_names_are_stable_per_query_and_index() {
        assert_eq!(suggested_name("butterfly", 0), suggested_name("butterfly", 0));
        assert_ne!(suggested_name("butterfly", 0), suggested_name("butterfly", 1));
        assert_ne!(suggested_name("butterfly", 0), suggested_name("moth", 0));
        assert!(suggested_name("butterfly", 0).starts_with("generated_"));
        assert!(suggested_name("butterfly", 0).ends_with(".jpg"));
    }

    #[tokio::test]
    async fn existing_file_short_circuits_without_download() {
        let tmp = tempfile::tempdir().unwrap();
        let name = suggested_name("butterfly", 0);
        std::fs::write(tmp.path().join(&name), b"already here").unwrap();

        let m = HttpMaterializer::new(tmp.path(), "/static/generated_images").unwrap();
        // The URL is bogus; idempotence means it is never fetched.
        let local = m
            .materialize("http://127.0.0.1:1/nope.jpg", &name)
            .await
            .unwrap();
        assert_eq!(local, format!("/static/generated_images/{name}"));
    }
}
