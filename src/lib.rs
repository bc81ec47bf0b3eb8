//! ProphetSol - Solana token lookup library
//!
//! Answers "what is this token worth and what do we know about it?" for a mint
//! by querying upstream providers in fixed priority order and merging what
//! succeeds.
//!
//! # Modules
//!
//! - `domain`: Mint validation, field extraction, TokenSnapshot
//! - `ports`: ProviderPort trait and ProviderOutcome
//! - `adapters`: Birdeye, Jupiter, token list, web server, CLI
//! - `config`: Configuration loading and validation
//! - `application`: Strict/lenient lookup orchestration and response building

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
