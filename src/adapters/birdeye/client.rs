//! Birdeye API Client
//!
//! One client per endpoint (`defi/token_overview`, `defi/price`). The overview
//! carries the rich market fields but is plan-gated; the price endpoint is the
//! cheaper fallback.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};

use crate::adapters::http::{self, ProviderError, SuccessSignal};
use crate::domain::fields::{
    first_number, first_string, CHANGE_24H_KEYS, LIQUIDITY_KEYS, OVERVIEW_CHANGE_KEYS, OVERVIEW_PRICE_KEYS,
    PRICE_ENDPOINT_PRICE_KEYS, VOLUME_24H_USD_KEYS,
};
use crate::domain::{Mint, ProviderFields};
use crate::ports::{ProviderOutcome, ProviderPort};

pub const DEFAULT_BIRDEYE_BASE: &str = "https://public-api.birdeye.so";

/// Birdeye endpoint served by a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirdeyeEndpoint {
    TokenOverview,
    Price,
}

impl BirdeyeEndpoint {
    fn path(&self) -> &'static str {
        match self {
            BirdeyeEndpoint::TokenOverview => "defi/token_overview",
            BirdeyeEndpoint::Price => "defi/price",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            BirdeyeEndpoint::TokenOverview => "birdeye-overview",
            BirdeyeEndpoint::Price => "birdeye-price",
        }
    }
}

/// Birdeye client configuration
#[derive(Debug, Clone)]
pub struct BirdeyeConfig {
    /// Base URL, without trailing path
    pub base_url: String,
    /// API key sent as `x-api-key`; `None` when not configured
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for BirdeyeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BIRDEYE_BASE.to_string(),
            api_key: None,
            timeout: Duration::from_secs(12),
        }
    }
}

/// Birdeye endpoint client
#[derive(Debug, Clone)]
pub struct BirdeyeClient {
    config: BirdeyeConfig,
    endpoint: BirdeyeEndpoint,
    http: Client,
}

impl BirdeyeClient {
    pub fn with_config(config: BirdeyeConfig, endpoint: BirdeyeEndpoint) -> Result<Self, ProviderError> {
        http::check_url(&config.base_url)?;
        let http = http::build_http_client(config.timeout)?;
        Ok(Self { config, endpoint, http })
    }

    pub fn overview(config: BirdeyeConfig) -> Result<Self, ProviderError> {
        Self::with_config(config, BirdeyeEndpoint::TokenOverview)
    }

    pub fn price(config: BirdeyeConfig) -> Result<Self, ProviderError> {
        Self::with_config(config, BirdeyeEndpoint::Price)
    }

    pub fn endpoint(&self) -> BirdeyeEndpoint {
        self.endpoint
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn url(&self) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), self.endpoint.path())
    }

    /// Pull normalized fields out of a successful payload's `data` object
    pub fn extract(endpoint: BirdeyeEndpoint, body: &Value) -> ProviderFields {
        let empty = Map::new();
        let d = body.get("data").and_then(Value::as_object).unwrap_or(&empty);

        match endpoint {
            BirdeyeEndpoint::TokenOverview => ProviderFields {
                price: first_number(d, OVERVIEW_PRICE_KEYS),
                change_24h: first_number(d, OVERVIEW_CHANGE_KEYS),
                volume_24h_usd: first_number(d, VOLUME_24H_USD_KEYS),
                liquidity: first_number(d, LIQUIDITY_KEYS),
                symbol: first_string(d, &["symbol"]),
                name: first_string(d, &["name"]),
                ..Default::default()
            },
            BirdeyeEndpoint::Price => ProviderFields {
                price: first_number(d, PRICE_ENDPOINT_PRICE_KEYS),
                change_24h: first_number(d, CHANGE_24H_KEYS),
                ..Default::default()
            },
        }
    }
}

#[async_trait]
impl ProviderPort for BirdeyeClient {
    fn name(&self) -> &'static str {
        self.endpoint.name()
    }

    async fn fetch(&self, mint: &Mint) -> ProviderOutcome {
        let mut req = self.http.get(self.url()).query(&[("address", mint.as_str())]);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("x-api-key", api_key);
        }

        let endpoint = self.endpoint;
        let outcome = http::fetch_outcome(req, SuccessSignal::BodyFlag, |body| {
            Ok(Self::extract(endpoint, body))
        })
        .await;

        tracing::debug!(provider = self.name(), mint = %mint, outcome = %outcome.describe(), "birdeye call finished");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_birdeye_config_default() {
        let config = BirdeyeConfig::default();
        assert_eq!(config.base_url, DEFAULT_BIRDEYE_BASE);
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_client_creation() {
        let client = BirdeyeClient::overview(BirdeyeConfig::default()).unwrap();
        assert_eq!(client.endpoint(), BirdeyeEndpoint::TokenOverview);
        assert!(!client.has_api_key());
        assert_eq!(client.name(), "birdeye-overview");
    }

    #[test]
    fn test_client_rejects_bad_base() {
        let config = BirdeyeConfig {
            base_url: "not-a-url".into(),
            ..Default::default()
        };
        assert!(BirdeyeClient::price(config).is_err());
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let config = BirdeyeConfig {
            base_url: "https://example.test/".into(),
            api_key: Some("k".into()),
            ..Default::default()
        };
        let client = BirdeyeClient::price(config).unwrap();
        assert_eq!(client.url(), "https://example.test/defi/price");
        assert!(client.has_api_key());
    }

    #[test]
    fn test_extract_overview() {
        let body = json!({
            "success": true,
            "data": {
                "symbol": "BONK",
                "name": "Bonk",
                "price": null,
                "value": 0.000021,
                "v24hChangePercent": -3.2,
                "v24hUSD": 1250000.0,
                "liquidity": 980000.5
            }
        });
        let f = BirdeyeClient::extract(BirdeyeEndpoint::TokenOverview, &body);
        assert_eq!(f.symbol.as_deref(), Some("BONK"));
        assert_eq!(f.name.as_deref(), Some("Bonk"));
        assert_eq!(f.price, Some(0.000021));
        assert_eq!(f.change_24h, Some(-3.2));
        assert_eq!(f.volume_24h_usd, Some(1250000.0));
        assert_eq!(f.liquidity, Some(980000.5));
    }

    #[test]
    fn test_extract_price_prefers_value() {
        let body = json!({"success": true, "data": {"value": 1.23, "price": 9.99, "priceChange24h": 0.5}});
        let f = BirdeyeClient::extract(BirdeyeEndpoint::Price, &body);
        assert_eq!(f.price, Some(1.23));
        assert_eq!(f.change_24h, Some(0.5));
        assert!(f.symbol.is_none());
    }

    #[test]
    fn test_extract_missing_data() {
        let f = BirdeyeClient::extract(BirdeyeEndpoint::Price, &json!({"success": true}));
        assert_eq!(f, ProviderFields::default());
    }
}
