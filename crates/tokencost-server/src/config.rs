use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use serde::Deserialize;
use tokencost_core::api::{DEFAULT_TIMEOUT, OPENROUTER_MODELS};

/// Server settings, read from an optional `tokencost.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub bind: String,
    /// Directory holding `models/<org>/<model>/model.json`.
    pub catalog_root: PathBuf,
    pub pricing_url: String,
    pub pricing_timeout_secs: u64,
    /// Allowed CORS origins. `"*"` allows any.
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            catalog_root: PathBuf::from("."),
            pricing_url: OPENROUTER_MODELS.to_string(),
            pricing_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl Config {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("reading {}", p.display()))?;
                Self::parse(&content).with_context(|| format!("bad config {}", p.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn parse(toml_str: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn pricing_timeout(&self) -> Duration {
        Duration::from_secs(self.pricing_timeout_secs)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}
