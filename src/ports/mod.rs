//! Ports Layer - Trait definitions for external dependencies
//!
//! Every upstream data source implements [`ProviderPort`]; the orchestrator
//! only sees the trait.

pub mod provider;
pub mod mocks;

pub use provider::{ProviderOutcome, ProviderPort};
pub use mocks::ScriptedProvider;

#[cfg(test)]
pub use provider::MockProviderPort;
