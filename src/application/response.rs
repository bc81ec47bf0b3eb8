//! Response Builder
//!
//! Maps lookup outcomes onto the two wire schemas. Pure: the same outcome
//! always renders to the same bytes.

use serde::Serialize;
use serde_json::{json, Value};

use super::lookup::{LenientOutcome, StrictOutcome};
use crate::adapters::token_metadata::TokenMetadata;
use crate::domain::mint::INVALID_MINT_NOTE;
use crate::domain::{Reason, SourceRecord, TokenSnapshot};

/// Placeholder for fields gated behind a paid Birdeye tier
pub const FREE_TIER_SENTINEL: &str = "unavailable (Free-Tier)";

pub const DEFAULT_PRICE_FAILURE_MESSAGE: &str =
    "Your API key is either suspended or lacks sufficient permissions to access this resource.";

pub const MISSING_KEY_MESSAGE: &str = "BIRDEYE_API_KEY is not set. Check the backend .env file.";

/// Status code and JSON body ready for the wire
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub status: u16,
    pub body: Value,
}

impl Rendered {
    fn new(status: u16, body: impl Serialize) -> Self {
        let body = serde_json::to_value(body).unwrap_or(Value::Null);
        Self { status, body }
    }
}

#[derive(Debug, Serialize)]
struct OverviewData<'a> {
    symbol: &'a Option<String>,
    name: &'a Option<String>,
    price: Option<f64>,
    #[serde(rename = "v24hChangePercent")]
    v24h_change_percent: Option<f64>,
    #[serde(rename = "v24hUSD")]
    v24h_usd: Option<f64>,
    liquidity: Option<f64>,
}

#[derive(Debug, Serialize)]
struct TokenInfoBody<'a> {
    ok: bool,
    address: &'a str,
    source: Option<&'static str>,
    data: OverviewData<'a>,
    reasons: &'a [Reason],
}

#[derive(Debug, Serialize)]
struct PriceFailure<'a> {
    success: bool,
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct TokenInfoFailure<'a> {
    ok: bool,
    error: &'static str,
    overview: Option<&'a Reason>,
    price: PriceFailure<'a>,
    reasons: &'a [Reason],
}

/// Render a strict (`/token_info`) outcome
pub fn strict(outcome: &StrictOutcome) -> Rendered {
    match outcome {
        StrictOutcome::InvalidMint(_) => Rendered::new(
            400,
            json!({"ok": false, "error": "invalid_mint", "message": INVALID_MINT_NOTE}),
        ),
        StrictOutcome::MissingCredential => Rendered::new(
            400,
            json!({"ok": false, "error": "missing_api_key", "message": MISSING_KEY_MESSAGE}),
        ),
        StrictOutcome::Found { mint, snapshot } => {
            let f = &snapshot.fields;
            Rendered::new(
                200,
                TokenInfoBody {
                    ok: true,
                    address: mint.as_str(),
                    source: snapshot.source.map(|s| s.tag()),
                    data: OverviewData {
                        symbol: &f.symbol,
                        name: &f.name,
                        price: f.price,
                        v24h_change_percent: f.change_24h,
                        v24h_usd: f.volume_24h_usd,
                        liquidity: f.liquidity,
                    },
                    reasons: &snapshot.reasons,
                },
            )
        }
        StrictOutcome::Exhausted { snapshot, message, .. } => {
            // 401 only when an upstream body supplied the message text
            let status = if message.is_some() { 401 } else { 400 };
            Rendered::new(
                status,
                TokenInfoFailure {
                    ok: false,
                    error: "birdeye_failed",
                    overview: snapshot.reasons.first(),
                    price: PriceFailure {
                        success: false,
                        message: message.as_deref().unwrap_or(DEFAULT_PRICE_FAILURE_MESSAGE),
                    },
                    reasons: &snapshot.reasons,
                },
            )
        }
        StrictOutcome::PriceFault { snapshot, .. } => Rendered::new(
            500,
            json!({"ok": false, "error": "exception_price", "details": snapshot.reasons}),
        ),
    }
}

#[derive(Debug, Serialize)]
struct RichData<'a> {
    mint: &'a str,
    price: Option<f64>,
    #[serde(rename = "change24h")]
    change_24h: Option<f64>,
    liquidity: &'static str,
    holders: &'static str,
    meta: TokenMetadata,
}

#[derive(Debug, Serialize)]
struct RichBody<'a> {
    ok: bool,
    data: Option<RichData<'a>>,
    notes: &'a [String],
    sources: &'a [SourceRecord],
}

/// Render a lenient (`/token_info_rich`) outcome
pub fn lenient(outcome: &LenientOutcome) -> Rendered {
    match outcome {
        LenientOutcome::InvalidMint(_) => Rendered::new(
            400,
            RichBody {
                ok: false,
                data: None,
                notes: &[INVALID_MINT_NOTE.to_string()],
                sources: &[],
            },
        ),
        LenientOutcome::Profile { mint, snapshot } => Rendered::new(200, rich_body(mint.as_str(), snapshot)),
    }
}

fn rich_body<'a>(mint: &'a str, snapshot: &'a TokenSnapshot) -> RichBody<'a> {
    RichBody {
        ok: snapshot.is_useful(),
        data: Some(RichData {
            mint,
            price: snapshot.fields.price,
            change_24h: snapshot.fields.change_24h,
            liquidity: FREE_TIER_SENTINEL,
            holders: FREE_TIER_SENTINEL,
            meta: TokenMetadata::from(&snapshot.fields),
        }),
        notes: &snapshot.notes,
        sources: &snapshot.sources,
    }
}
