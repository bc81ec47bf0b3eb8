//! Field Extraction
//!
//! Upstream payloads name the same attribute differently (`price` vs `value`,
//! three spellings of the 24h change). Each normalized attribute is read from an
//! ordered list of candidate keys; the first non-null value wins.

use serde_json::{Map, Value};

/// Overview endpoint: `price` preferred over `value`
pub const OVERVIEW_PRICE_KEYS: &[&str] = &["price", "value"];

/// Price endpoint: `value` preferred over `price`
pub const PRICE_ENDPOINT_PRICE_KEYS: &[&str] = &["value", "price"];

pub const CHANGE_24H_KEYS: &[&str] = &["change24h", "priceChange24h", "diff24h"];

pub const OVERVIEW_CHANGE_KEYS: &[&str] = &["v24hChangePercent"];

pub const VOLUME_24H_USD_KEYS: &[&str] = &["v24hUSD"];

pub const LIQUIDITY_KEYS: &[&str] = &["liquidity"];

pub const LOGO_KEYS: &[&str] = &["logoURI", "logoUri"];

/// First candidate key whose value is present and not JSON null.
pub fn first_present<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

/// First non-null candidate read as a number.
///
/// Numeric strings are accepted since some upstreams quote their floats.
/// Non-finite values (`"NaN"`, `"inf"`) read as absent.
pub fn first_number(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    first_present(obj, keys).and_then(as_number)
}

/// First non-null candidate read as a string.
pub fn first_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    first_present(obj, keys)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn as_number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    n.filter(|f: &f64| f.is_finite())
}

/// Python-style truthiness of a JSON value, used for upstream `success` flags.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
