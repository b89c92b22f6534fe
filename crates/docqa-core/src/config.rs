//! Lightweight configuration loader and typed retrieval settings.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env
//! vars. `RetrievalConfig` carries the recognized numeric options with the
//! reference defaults and validates them before any work starts.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::env;

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_"));

        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Extract the `retrieval` section, falling back to the defaults when the
    /// section is absent, and validate it.
    pub fn retrieval(&self) -> anyhow::Result<RetrievalConfig> {
        let cfg: RetrievalConfig = self.figment.extract_inner("retrieval").unwrap_or_default();
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Chunking and query knobs. Defaults match the reference behavior:
/// 900-character windows, 120 characters of overlap, 5 results per query.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub max_chars: usize,
    pub overlap: usize,
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { max_chars: 900, overlap: 120, top_k: 5 }
    }
}

impl RetrievalConfig {
    /// Reject degenerate chunking parameters before any document is touched.
    /// `top_k` is deliberately unconstrained: zero is legal and yields empty
    /// result sets.
    pub fn validate(&self) -> Result<()> {
        if self.max_chars == 0 {
            return Err(Error::InvalidConfiguration(
                "retrieval.max_chars must be positive".to_string(),
            ));
        }
        if self.overlap >= self.max_chars {
            return Err(Error::InvalidConfiguration(format!(
                "retrieval.overlap ({}) must be smaller than retrieval.max_chars ({})",
                self.overlap, self.max_chars
            )));
        }
        Ok(())
    }
}
