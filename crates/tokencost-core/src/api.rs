use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::error::{Result, TcError};
use crate::pricing::{parse_pricing, PricingRecord};

pub const OPENROUTER_MODELS: &str = "https://openrouter.ai/api/v1/models";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the external model price list.
#[derive(Debug, Clone)]
pub struct PricingClient {
    http: Client,
    url: String,
}

impl PricingClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn openrouter() -> Result<Self> {
        Self::new(OPENROUTER_MODELS, DEFAULT_TIMEOUT)
    }

    /// One GET against the price list. Any failure is returned as-is.
    pub async fn fetch_pricing(&self) -> Result<Vec<PricingRecord>> {
        let resp = self.http.get(&self.url).send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(TcError::Api { status, body });
        }
        let body: Value = resp.json().await?;
        parse_pricing(&body)
    }

    /// Same as [`fetch_pricing`](Self::fetch_pricing), but an unavailable
    /// upstream yields an empty list. Callers then keep catalog prices.
    pub async fn fetch_pricing_or_empty(&self) -> Vec<PricingRecord> {
        match self.fetch_pricing().await {
            Ok(records) => {
                tracing::debug!(count = records.len(), "fetched live pricing");
                records
            }
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "pricing unavailable, continuing without it");
                Vec::new()
            }
        }
    }
}
