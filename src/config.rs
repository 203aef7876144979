// src/config.rs
//! Engine configuration: TOML file with env-var path override, falling back
//! to built-in defaults so the binary runs with zero setup.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "ENGINE_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/engine.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub bind_addr: String,
    /// Curated top-up kicks in below this many validated candidates.
    pub min_validated: usize,
    /// Bounded novelty re-draws per request.
    pub max_attempts: usize,
    pub facts_window: usize,
    pub news_window: usize,
    pub news_max_results: usize,
    pub default_image_count: usize,
    pub max_image_count: usize,
    pub generated_dir: String,
    pub generated_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            min_validated: 5,
            max_attempts: 10,
            facts_window: 5,
            news_window: 10,
            news_max_results: 10,
            default_image_count: 6,
            max_image_count: 20,
            generated_dir: "static/generated_images".to_string(),
            generated_prefix: "/static/generated_images".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading engine config from {}", path.display()))?;
        toml::from_str(&content).context("parsing engine config toml")
    }

    /// Load using env var + fallbacks:
    /// 1) $ENGINE_CONFIG_PATH (must exist when set)
    /// 2) config/engine.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            return Self::load_from(&pb)
                .with_context(|| format!("{ENV_CONFIG_PATH} points to an unreadable config"));
        }
        let default = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default.exists() {
            return Self::load_from(&default);
        }
        Ok(Self::default())
    }
}
