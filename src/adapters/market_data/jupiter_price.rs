use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::adapters::http::{self, ProviderError, SuccessSignal};
use crate::domain::{Mint, ProviderFields};
use crate::ports::{ProviderOutcome, ProviderPort};

pub const JUPITER_PRICE_API: &str = "https://price.jup.ag/v4/price";

/// Jupiter price client configuration
#[derive(Debug, Clone)]
pub struct JupiterPriceConfig {
    pub price_url: String,
    pub timeout: Duration,
}

impl Default for JupiterPriceConfig {
    fn default() -> Self {
        Self {
            price_url: JUPITER_PRICE_API.to_string(),
            timeout: Duration::from_secs(8),
        }
    }
}

/// Secondary, keyless price source
#[derive(Debug, Clone)]
pub struct JupiterPriceClient {
    config: JupiterPriceConfig,
    http: Client,
}

impl JupiterPriceClient {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_config(JupiterPriceConfig::default())
    }

    pub fn with_config(config: JupiterPriceConfig) -> Result<Self, ProviderError> {
        http::check_url(&config.price_url)?;
        let http = http::build_http_client(config.timeout)?;
        Ok(Self { config, http })
    }

    /// Read the price record for `mint`. A missing record is not an error.
    pub fn extract(mint: &str, body: &Value) -> Result<ProviderFields, String> {
        let response = PriceResponse::deserialize(body).map_err(|e| format!("Parse error: {}", e))?;

        Ok(ProviderFields {
            price: response.data.get(mint).and_then(|p| p.price).filter(|p| p.is_finite()),
            ..Default::default()
        })
    }
}

#[async_trait]
impl ProviderPort for JupiterPriceClient {
    fn name(&self) -> &'static str {
        "jupiter-price"
    }

    async fn fetch(&self, mint: &Mint) -> ProviderOutcome {
        let req = self.http.get(&self.config.price_url).query(&[("ids", mint.as_str())]);

        let key = mint.as_str();
        let outcome = http::fetch_outcome(req, SuccessSignal::HttpStatus, |body| Self::extract(key, body)).await;

        tracing::debug!(provider = self.name(), mint = %mint, outcome = %outcome.describe(), "jupiter call finished");
        outcome
    }
}

#[derive(Debug, Deserialize)]
struct PriceResponse {
    #[serde(default)]
    data: HashMap<String, PriceData>,
}

#[derive(Debug, Deserialize)]
struct PriceData {
    #[serde(default)]
    price: Option<f64>,
}
