//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Birdeye: primary market data (overview and price endpoints)
//! - Market Data: Jupiter price feed
//! - Token Metadata: Solana token list
//! - Web: axum HTTP service
//! - CLI: Command-line interface handlers

pub mod http;
pub mod birdeye;
pub mod market_data;
pub mod token_metadata;
pub mod web;
pub mod cli;

pub use birdeye::BirdeyeClient;
pub use market_data::JupiterPriceClient;
pub use token_metadata::TokenListClient;
pub use cli::CliApp;
