//! Birdeye Adapter
//!
//! Primary market-data provider. API-key authenticated; the same config
//! drives both the overview and the price endpoint clients.

mod client;

pub use client::{BirdeyeClient, BirdeyeConfig, BirdeyeEndpoint, DEFAULT_BIRDEYE_BASE};
