//! Shared application state for the HTTP handlers.
//!
//! Everything here is read-only after startup; requests share nothing mutable.

use std::sync::Arc;

use crate::adapters::birdeye::BirdeyeClient;
use crate::adapters::http::ProviderError;
use crate::adapters::market_data::JupiterPriceClient;
use crate::adapters::token_metadata::TokenListClient;
use crate::application::{LenientLookup, StrictLookup};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub strict: Arc<StrictLookup>,
    pub lenient: Arc<LenientLookup>,
    pub key_loaded: bool,
    pub birdeye_base: String,
    /// Whether a `.env` file was found at startup
    pub env_file_found: bool,
}

impl AppState {
    /// Wire provider clients from configuration
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let strict_birdeye = config.birdeye_config(config.strict_timeout());
        let lenient_birdeye = config.birdeye_config(config.lenient_price_timeout());
        let key_loaded = strict_birdeye.api_key.is_some();
        let birdeye_base = strict_birdeye.base_url.clone();

        let strict = StrictLookup::new(
            key_loaded,
            Arc::new(BirdeyeClient::overview(strict_birdeye.clone())?),
            Arc::new(BirdeyeClient::price(strict_birdeye)?),
        );

        let lenient = LenientLookup::new(
            key_loaded,
            Arc::new(BirdeyeClient::price(lenient_birdeye)?),
            Arc::new(JupiterPriceClient::with_config(config.jupiter_config())?),
            Arc::new(TokenListClient::with_config(config.token_list_config())?),
        );

        Ok(Self {
            env_file_found: dotenvy::dotenv_iter().is_ok(),
            ..Self::new(strict, lenient, key_loaded, birdeye_base)
        })
    }

    pub fn new(strict: StrictLookup, lenient: LenientLookup, key_loaded: bool, birdeye_base: String) -> Self {
        Self {
            strict: Arc::new(strict),
            lenient: Arc::new(lenient),
            key_loaded,
            birdeye_base,
            env_file_found: false,
        }
    }
}
