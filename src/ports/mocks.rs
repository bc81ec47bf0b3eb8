use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::provider::{ProviderOutcome, ProviderPort};
use crate::domain::Mint;

/// Provider that replays scripted outcomes and records every call.
///
/// Outcomes are consumed in order; the last one repeats once the script runs
/// out. Clones share the call log, so a test can keep a handle after moving
/// the provider into an orchestrator.
#[derive(Debug, Clone)]
pub struct ScriptedProvider {
    name: &'static str,
    script: Arc<Mutex<VecDeque<ProviderOutcome>>>,
    last: Arc<Mutex<Option<ProviderOutcome>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProvider {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            script: Arc::new(Mutex::new(VecDeque::new())),
            last: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Builder method to queue the next outcome
    pub fn then(self, outcome: ProviderOutcome) -> Self {
        self.script.lock().unwrap().push_back(outcome);
        self
    }

    /// Mints this provider was called with, in order
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ProviderPort for ScriptedProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, mint: &Mint) -> ProviderOutcome {
        self.calls.lock().unwrap().push(mint.to_string());

        let next = self.script.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        match next {
            Some(outcome) => {
                *last = Some(outcome.clone());
                outcome
            }
            None => last
                .clone()
                .unwrap_or_else(|| ProviderOutcome::Error("No response configured".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProviderFields;

    const MINT: &str = "So11111111111111111111111111111111111111112";

    #[tokio::test]
    async fn test_scripted_provider_replays_and_records() {
        let provider = ScriptedProvider::new("mock")
            .then(ProviderOutcome::success(ProviderFields::with_price(1.5)))
            .then(ProviderOutcome::Error("boom".into()));
        let handle = provider.clone();
        let mint = Mint::parse(MINT).unwrap();

        assert!(provider.fetch(&mint).await.is_success());
        assert_eq!(provider.fetch(&mint).await, ProviderOutcome::Error("boom".into()));
        // script exhausted: last outcome repeats
        assert_eq!(provider.fetch(&mint).await, ProviderOutcome::Error("boom".into()));

        assert_eq!(handle.call_count(), 3);
        assert_eq!(handle.get_calls()[0], MINT);
    }

    #[tokio::test]
    async fn test_unscripted_provider_errors() {
        let provider = ScriptedProvider::new("empty");
        let mint = Mint::parse(MINT).unwrap();
        assert!(matches!(provider.fetch(&mint).await, ProviderOutcome::Error(_)));
    }
}
