//! Token Metadata Types
//!
//! Wire types for the Solana token list and the normalized metadata record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::fields::{first_number, first_string, LOGO_KEYS};
use crate::domain::ProviderFields;

/// Metadata for one token, as served in lookup responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub decimals: Option<u8>,
    pub logo: Option<String>,
}

impl TokenMetadata {
    pub fn is_empty(&self) -> bool {
        self.symbol.is_none() && self.name.is_none() && self.decimals.is_none() && self.logo.is_none()
    }
}

impl From<&ProviderFields> for TokenMetadata {
    fn from(f: &ProviderFields) -> Self {
        Self {
            symbol: f.symbol.clone(),
            name: f.name.clone(),
            decimals: f.decimals,
            logo: f.logo.clone(),
        }
    }
}

impl From<TokenMetadata> for ProviderFields {
    fn from(m: TokenMetadata) -> Self {
        ProviderFields {
            symbol: m.symbol,
            name: m.name,
            decimals: m.decimals,
            logo: m.logo,
            ..Default::default()
        }
    }
}

/// Borrowed view over a token list document.
///
/// Entries stay untyped until one matches, so a malformed sibling entry
/// cannot fail the lookup of a well-formed one.
#[derive(Debug, Clone, Copy)]
pub struct TokenList<'a> {
    tokens: &'a [Value],
}

impl<'a> TokenList<'a> {
    /// A missing `tokens` key reads as an empty list; any other shape is an error
    pub fn from_body(body: &'a Value) -> Result<Self, String> {
        match body.get("tokens") {
            None | Some(Value::Null) => Ok(Self { tokens: &[] }),
            Some(Value::Array(tokens)) => Ok(Self { tokens }),
            Some(other) => Err(format!("Failed to parse token list: `tokens` is not an array ({})", kind(other))),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Exact address match; the first matching entry wins
    pub fn find(&self, mint: &str) -> Option<TokenListEntry> {
        self.tokens
            .iter()
            .filter_map(Value::as_object)
            .find(|t| t.get("address").and_then(Value::as_str) == Some(mint))
            .map(TokenListEntry::from_object)
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Fields read from one matched token list entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenListEntry {
    pub address: String,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub decimals: Option<u8>,
    pub logo: Option<String>,
}

impl TokenListEntry {
    fn from_object(t: &Map<String, Value>) -> Self {
        Self {
            address: first_string(t, &["address"]).unwrap_or_default(),
            symbol: first_string(t, &["symbol"]),
            name: first_string(t, &["name"]),
            decimals: first_number(t, &["decimals"])
                .filter(|d| d.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(d))
                .map(|d| d as u8),
            logo: first_string(t, LOGO_KEYS),
        }
    }

    pub fn metadata(&self) -> TokenMetadata {
        TokenMetadata {
            symbol: self.symbol.clone(),
            name: self.name.clone(),
            decimals: self.decimals,
            logo: self.logo.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_body() -> Value {
        json!({
            "name": "Solana Token List",
            "tokens": [
                {
                    "chainId": 101,
                    "address": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                    "symbol": "USDC",
                    "name": "USD Coin",
                    "decimals": 6,
                    "logoURI": "https://example.test/usdc.png",
                    "tags": ["stablecoin"]
                },
                {
                    "address": "So11111111111111111111111111111111111111112",
                    "symbol": "SOL",
                    "name": "Wrapped SOL",
                    "decimals": 9,
                    "logoUri": "https://example.test/sol.png"
                },
                {"chainId": 101}
            ]
        })
    }

    #[test]
    fn test_find_exact_match() {
        let body = sample_body();
        let list = TokenList::from_body(&body).unwrap();
        assert_eq!(list.len(), 3);

        let meta = list.find("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v").unwrap().metadata();
        assert_eq!(meta.symbol.as_deref(), Some("USDC"));
        assert_eq!(meta.decimals, Some(6));
        assert_eq!(meta.logo.as_deref(), Some("https://example.test/usdc.png"));
    }

    #[test]
    fn test_logo_lowercase_fallback() {
        let body = sample_body();
        let list = TokenList::from_body(&body).unwrap();
        let meta = list.find("So11111111111111111111111111111111111111112").unwrap().metadata();
        assert_eq!(meta.logo.as_deref(), Some("https://example.test/sol.png"));
    }

    #[test]
    fn test_no_match() {
        let body = sample_body();
        let list = TokenList::from_body(&body).unwrap();
        assert!(list.find("DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263").is_none());
        // case-sensitive
        assert!(list.find("epjfwdd5aufqssqem2qn1xzybapc8g4wegGkzwytdt1v").is_none());
    }

    #[test]
    fn test_malformed_siblings_are_ignored() {
        let body = json!({
            "tokens": [
                "not an object",
                {"address": 42, "symbol": "NUM"},
                {"address": "Bad1111111111111111111111111111111111111111", "decimals": 300},
                {"address": "So11111111111111111111111111111111111111112", "symbol": "SOL", "decimals": 9}
            ]
        });
        let list = TokenList::from_body(&body).unwrap();

        let sol = list.find("So11111111111111111111111111111111111111112").unwrap();
        assert_eq!(sol.symbol.as_deref(), Some("SOL"));
        assert_eq!(sol.decimals, Some(9));

        // out-of-range decimals are dropped, the rest of the entry survives
        let bad = list.find("Bad1111111111111111111111111111111111111111").unwrap();
        assert_eq!(bad.decimals, None);
        assert_eq!(bad.address, "Bad1111111111111111111111111111111111111111");
    }

    #[test]
    fn test_missing_tokens_key() {
        let body = json!({});
        assert!(TokenList::from_body(&body).unwrap().is_empty());
        assert!(TokenList::from_body(&json!({"tokens": "nope"})).is_err());
    }

    #[test]
    fn test_metadata_conversions() {
        let meta = TokenMetadata {
            symbol: Some("SOL".into()),
            decimals: Some(9),
            ..Default::default()
        };
        let fields: ProviderFields = meta.clone().into();
        assert!(fields.has_metadata());
        assert!(fields.price.is_none());
        assert_eq!(TokenMetadata::from(&fields), meta);
        assert!(TokenMetadata::default().is_empty());
    }
}
