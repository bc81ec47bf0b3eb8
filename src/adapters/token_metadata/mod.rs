//! Token Metadata Adapter
//!
//! Looks up symbol, name, decimals and logo for a mint in the static Solana
//! token list.
//!
//! # Example
//!
//! ```rust,ignore
//! use prophet_sol::adapters::token_metadata::TokenListClient;
//! use prophet_sol::domain::Mint;
//! use prophet_sol::ports::ProviderPort;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TokenListClient::new()?;
//!     let mint = Mint::parse("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v")?;
//!     println!("{:?}", client.fetch(&mint).await);
//!     Ok(())
//! }
//! ```

mod client;
mod types;

pub use client::{TokenListClient, TokenListConfig, SOLANA_TOKEN_LIST_URL};
pub use types::{TokenList, TokenListEntry, TokenMetadata};
