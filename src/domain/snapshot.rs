//! Token Snapshot
//!
//! The accumulating result of one lookup. Fields are filled monotonically:
//! once a higher-priority provider sets a field, later providers cannot
//! overwrite it.

use serde::Serialize;
use serde_json::Value;

/// Lenient-mode diagnostic text cap
pub const MAX_ERROR_CHARS: usize = 160;

/// Provider stage, in fixed priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Overview,
    Price,
    SecondaryPrice,
    TokenList,
}

impl Stage {
    /// Short tag used in strict-mode `source` and `reasons[].stage`
    pub fn tag(&self) -> &'static str {
        match self {
            Stage::Overview => "overview",
            Stage::Price => "price",
            Stage::SecondaryPrice => "jupiter",
            Stage::TokenList => "token_list",
        }
    }

    /// Upstream label used in lenient-mode `sources[].source`
    pub fn source_label(&self) -> &'static str {
        match self {
            Stage::Overview => "birdeye/defi/token_overview",
            Stage::Price => "birdeye/defi/price",
            Stage::SecondaryPrice => "jupiter/v4/price",
            Stage::TokenList => "solana-token-list",
        }
    }
}

/// Normalized fields a provider may supply
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProviderFields {
    pub price: Option<f64>,
    pub change_24h: Option<f64>,
    pub volume_24h_usd: Option<f64>,
    pub liquidity: Option<f64>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub decimals: Option<u8>,
    pub logo: Option<String>,
}

impl ProviderFields {
    pub fn with_price(price: f64) -> Self {
        Self {
            price: Some(price),
            ..Default::default()
        }
    }

    pub fn has_metadata(&self) -> bool {
        self.symbol.is_some() || self.name.is_some() || self.decimals.is_some() || self.logo.is_some()
    }
}

/// Strict-mode record of a provider that did not answer usefully
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reason {
    pub stage: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
}

impl Reason {
    pub fn rejected(stage: Stage, status: u16, body: Value) -> Self {
        Self {
            stage: stage.tag(),
            status: Some(status),
            body: Some(body),
            exception: None,
        }
    }

    pub fn failed(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage: stage.tag(),
            status: None,
            body: None,
            exception: Some(message.into()),
        }
    }

    /// Upstream `message` text, if the body was a JSON object carrying one.
    pub fn upstream_message(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| b.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
    }
}

/// Lenient-mode record of every provider attempted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceRecord {
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceRecord {
    pub fn ok(stage: Stage) -> Self {
        Self {
            source: stage.source_label(),
            status: None,
            note: None,
            error: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(truncate_chars(error, MAX_ERROR_CHARS));
        self
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Merged lookup state for one request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenSnapshot {
    pub fields: ProviderFields,
    /// Stage that supplied the authoritative price
    pub source: Option<Stage>,
    pub notes: Vec<String>,
    pub reasons: Vec<Reason>,
    pub sources: Vec<SourceRecord>,
}

impl TokenSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the price if still unset; tags `source` when it lands.
    pub fn adopt_price(&mut self, stage: Stage, price: Option<f64>) {
        if self.fields.price.is_none() && price.is_some() {
            self.fields.price = price;
            self.source = Some(stage);
        }
    }

    /// Fill unset price and 24h change.
    pub fn merge_price(&mut self, stage: Stage, incoming: &ProviderFields) {
        self.adopt_price(stage, incoming.price);
        fill(&mut self.fields.change_24h, incoming.change_24h);
    }

    /// Fill every unset field from `incoming`.
    pub fn merge_all(&mut self, stage: Stage, incoming: &ProviderFields) {
        self.merge_price(stage, incoming);
        if self.source.is_none() {
            self.source = Some(stage);
        }
        let f = &mut self.fields;
        fill(&mut f.volume_24h_usd, incoming.volume_24h_usd);
        fill(&mut f.liquidity, incoming.liquidity);
        fill(&mut f.symbol, incoming.symbol.clone());
        fill(&mut f.name, incoming.name.clone());
        fill(&mut f.decimals, incoming.decimals);
        fill(&mut f.logo, incoming.logo.clone());
    }

    /// Fill unset metadata fields only.
    pub fn merge_metadata(&mut self, incoming: &ProviderFields) {
        let f = &mut self.fields;
        fill(&mut f.symbol, incoming.symbol.clone());
        fill(&mut f.name, incoming.name.clone());
        fill(&mut f.decimals, incoming.decimals);
        fill(&mut f.logo, incoming.logo.clone());
    }

    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn has_price(&self) -> bool {
        self.fields.price.is_some()
    }

    /// Price known, or at least one metadata field known
    pub fn is_useful(&self) -> bool {
        self.has_price() || self.fields.has_metadata()
    }
}

fn fill<T>(slot: &mut Option<T>, incoming: Option<T>) {
    if slot.is_none() {
        *slot = incoming;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_price_not_overwritten() {
        let mut snap = TokenSnapshot::new();
        snap.merge_price(Stage::Price, &ProviderFields::with_price(1.0));
        snap.merge_price(Stage::SecondaryPrice, &ProviderFields::with_price(2.0));
        assert_eq!(snap.fields.price, Some(1.0));
        assert_eq!(snap.source, Some(Stage::Price));
    }

    #[test]
    fn test_adopt_price_none_leaves_source_unset() {
        let mut snap = TokenSnapshot::new();
        snap.adopt_price(Stage::SecondaryPrice, None);
        assert!(snap.source.is_none());
        assert!(!snap.has_price());
    }

    #[test]
    fn test_merge_price_ignores_metadata() {
        let mut snap = TokenSnapshot::new();
        let incoming = ProviderFields {
            price: Some(3.0),
            symbol: Some("BONK".into()),
            ..Default::default()
        };
        snap.merge_price(Stage::Price, &incoming);
        assert_eq!(snap.fields.price, Some(3.0));
        assert!(snap.fields.symbol.is_none());
    }

    #[test]
    fn test_merge_metadata_keeps_price_source() {
        let mut snap = TokenSnapshot::new();
        snap.merge_metadata(&ProviderFields {
            name: Some("Wrapped SOL".into()),
            decimals: Some(9),
            ..Default::default()
        });
        assert!(snap.source.is_none());
        assert!(snap.is_useful());
        assert!(!snap.has_price());
    }

    #[test]
    fn test_empty_snapshot_not_useful() {
        assert!(!TokenSnapshot::new().is_useful());
    }

    #[test]
    fn test_source_record_truncates_error() {
        let long = "x".repeat(500);
        let rec = SourceRecord::ok(Stage::SecondaryPrice).with_error(&long);
        assert_eq!(rec.error.unwrap().chars().count(), MAX_ERROR_CHARS);
    }

    #[test]
    fn test_source_record_serialization_skips_none() {
        let rec = SourceRecord::ok(Stage::Price).with_status(429).with_note("rate-limit/plan");
        assert_eq!(
            serde_json::to_value(&rec).unwrap(),
            json!({"source": "birdeye/defi/price", "status": 429, "note": "rate-limit/plan"})
        );
    }

    #[test]
    fn test_reason_upstream_message() {
        let r = Reason::rejected(Stage::Price, 200, json!({"success": false, "message": "Unauthorized"}));
        assert_eq!(r.upstream_message(), Some("Unauthorized"));

        let r = Reason::rejected(Stage::Price, 401, json!("plain text"));
        assert_eq!(r.upstream_message(), None);

        let r = Reason::failed(Stage::Price, "timed out");
        assert_eq!(r.upstream_message(), None);
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            json!({"stage": "price", "exception": "timed out"})
        );
    }
}
