use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Mint, ProviderFields};

/// Result of one provider call.
///
/// Every failure mode is a value; provider clients never return `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    /// Upstream answered and signalled success
    Success { status: u16, fields: ProviderFields },

    /// Upstream answered but refused or reported no success
    Unavailable { status: u16, note: String, body: Value },

    /// Transport, timeout or decoding failure
    Error(String),
}

impl ProviderOutcome {
    pub fn success(fields: ProviderFields) -> Self {
        ProviderOutcome::Success { status: 200, fields }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProviderOutcome::Success { .. })
    }

    /// Short description for logs and lenient-mode error records
    pub fn describe(&self) -> String {
        match self {
            ProviderOutcome::Success { status, .. } => format!("success ({})", status),
            ProviderOutcome::Unavailable { status, note, .. } => format!("HTTP {}: {}", status, note),
            ProviderOutcome::Error(msg) => msg.clone(),
        }
    }
}

/// Upstream data provider port
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProviderPort: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Perform one bounded call for `mint`
    async fn fetch(&self, mint: &Mint) -> ProviderOutcome;
}
