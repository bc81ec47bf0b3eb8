//! Market Data Adapters
//!
//! - `JupiterPriceClient`: keyless secondary price feed, consulted when the
//!   Birdeye price is unavailable.

mod jupiter_price;

pub use jupiter_price::{JupiterPriceClient, JupiterPriceConfig, JUPITER_PRICE_API};
