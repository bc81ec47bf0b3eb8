//! Token List Client
//!
//! Fetches the static Solana token list and looks up a mint by exact address.
//! The list is fetched fresh on every call; nothing is cached.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::types::TokenList;
use crate::adapters::http::{self, ProviderError, SuccessSignal};
use crate::domain::{Mint, ProviderFields};
use crate::ports::{ProviderOutcome, ProviderPort};

pub const SOLANA_TOKEN_LIST_URL: &str =
    "https://raw.githubusercontent.com/solana-labs/token-list/main/src/tokens/solana.tokenlist.json";

/// Configuration for the TokenListClient
#[derive(Debug, Clone)]
pub struct TokenListConfig {
    /// Token list document URL
    pub list_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for TokenListConfig {
    fn default() -> Self {
        Self {
            list_url: SOLANA_TOKEN_LIST_URL.to_string(),
            timeout: Duration::from_secs(12),
        }
    }
}

impl TokenListConfig {
    /// Create config with a custom list URL
    pub fn with_list_url(list_url: impl Into<String>) -> Self {
        Self {
            list_url: list_url.into(),
            ..Default::default()
        }
    }
}

/// Client for the static token metadata list
#[derive(Debug, Clone)]
pub struct TokenListClient {
    config: TokenListConfig,
    http: Client,
}

impl TokenListClient {
    /// Create a new TokenListClient with default configuration
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_config(TokenListConfig::default())
    }

    /// Create a new TokenListClient with custom configuration
    pub fn with_config(config: TokenListConfig) -> Result<Self, ProviderError> {
        http::check_url(&config.list_url)?;
        let http = http::build_http_client(config.timeout)?;
        Ok(Self { config, http })
    }

    /// Metadata for `mint`, or empty fields when the list has no such entry
    pub fn extract(mint: &str, body: &Value) -> Result<ProviderFields, String> {
        Ok(TokenList::from_body(body)?
            .find(mint)
            .map(|entry| entry.metadata().into())
            .unwrap_or_default())
    }
}

#[async_trait]
impl ProviderPort for TokenListClient {
    fn name(&self) -> &'static str {
        "token-list"
    }

    async fn fetch(&self, mint: &Mint) -> ProviderOutcome {
        let req = self.http.get(&self.config.list_url);

        let key = mint.as_str();
        let outcome = http::fetch_outcome(req, SuccessSignal::HttpStatus, |body| Self::extract(key, body)).await;

        tracing::debug!(provider = self.name(), mint = %mint, outcome = %outcome.describe(), "token list lookup finished");
        outcome
    }
}
