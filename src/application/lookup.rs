//! Token Lookup Orchestrator
//!
//! Drives the provider clients in fixed priority order and merges what they
//! return into a [`TokenSnapshot`]. Two strategies share one chaining loop:
//!
//! - [`StrictLookup`]: overview, then price. First success wins; no merging.
//! - [`LenientLookup`]: Birdeye price, Jupiter price, token list. Merges every
//!   partial answer and never fails on provider faults.
//!
//! Providers are awaited one at a time. No retries, no reordering.

use std::ops::ControlFlow;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{Mint, MintError, Reason, SourceRecord, Stage, TokenSnapshot};
use crate::ports::{ProviderOutcome, ProviderPort};

pub const KEY_MISSING_NOTE: &str = "birdeye api key missing";
pub const PRICE_UNAVAILABLE_NOTE: &str = "price unavailable (Free-Tier / fallback failed)";
pub const META_MISSING_NOTE: &str = "meta unavailable (token list)";
pub const META_FETCH_FAILED_NOTE: &str = "meta fetch failed";

/// One provider attempt in a chain
pub struct Attempt<'a> {
    pub stage: Stage,
    provider: &'a dyn ProviderPort,
    guard: fn(&TokenSnapshot) -> bool,
}

impl<'a> Attempt<'a> {
    pub fn always(stage: Stage, provider: &'a dyn ProviderPort) -> Self {
        Self {
            stage,
            provider,
            guard: |_| true,
        }
    }

    /// Attempt only if `guard` holds for the snapshot at that point
    pub fn when(stage: Stage, provider: &'a dyn ProviderPort, guard: fn(&TokenSnapshot) -> bool) -> Self {
        Self { stage, provider, guard }
    }
}

/// Run `attempts` in order, handing each outcome to `decide`.
///
/// Stops at the first `Break` and returns its value; `None` if every attempt
/// continued.
pub async fn run_chain<B, F>(
    mint: &Mint,
    attempts: Vec<Attempt<'_>>,
    snapshot: &mut TokenSnapshot,
    mut decide: F,
) -> Option<B>
where
    F: FnMut(Stage, ProviderOutcome, &mut TokenSnapshot) -> ControlFlow<B>,
{
    for attempt in attempts {
        if !(attempt.guard)(snapshot) {
            debug!(stage = attempt.stage.tag(), "skipping provider");
            continue;
        }

        let outcome = attempt.provider.fetch(mint).await;
        if !outcome.is_success() {
            warn!(
                provider = attempt.provider.name(),
                mint = %mint,
                "provider did not answer: {}",
                outcome.describe()
            );
        }

        if let ControlFlow::Break(b) = decide(attempt.stage, outcome, snapshot) {
            return Some(b);
        }
    }
    None
}

/// Result of a strict lookup
#[derive(Debug, Clone, PartialEq)]
pub enum StrictOutcome {
    InvalidMint(MintError),
    MissingCredential,
    Found { mint: Mint, snapshot: TokenSnapshot },
    /// Both providers declined; `message` is the price body's `message` text
    Exhausted {
        mint: Mint,
        snapshot: TokenSnapshot,
        message: Option<String>,
    },
    /// Transport failure on the last fallback
    PriceFault { mint: Mint, snapshot: TokenSnapshot },
}

enum Verdict {
    Found,
    Exhausted(Option<String>),
    PriceFault,
}

/// First-success-wins lookup: overview, then price
#[derive(Clone)]
pub struct StrictLookup {
    has_api_key: bool,
    overview: Arc<dyn ProviderPort>,
    price: Arc<dyn ProviderPort>,
}

impl StrictLookup {
    pub fn new(has_api_key: bool, overview: Arc<dyn ProviderPort>, price: Arc<dyn ProviderPort>) -> Self {
        Self {
            has_api_key,
            overview,
            price,
        }
    }

    pub async fn lookup(&self, address: &str) -> StrictOutcome {
        let mint = match Mint::parse(address) {
            Ok(m) => m,
            Err(e) => return StrictOutcome::InvalidMint(e),
        };

        if !self.has_api_key {
            warn!(mint = %mint, "strict lookup refused: no Birdeye API key configured");
            return StrictOutcome::MissingCredential;
        }

        let mut snapshot = TokenSnapshot::new();
        let attempts = vec![
            Attempt::always(Stage::Overview, self.overview.as_ref()),
            Attempt::always(Stage::Price, self.price.as_ref()),
        ];

        let verdict = run_chain(&mint, attempts, &mut snapshot, decide_strict).await;

        let outcome = match verdict {
            Some(Verdict::Found) => StrictOutcome::Found { mint, snapshot },
            Some(Verdict::PriceFault) => StrictOutcome::PriceFault { mint, snapshot },
            Some(Verdict::Exhausted(message)) => StrictOutcome::Exhausted { mint, snapshot, message },
            None => StrictOutcome::Exhausted {
                mint,
                snapshot,
                message: None,
            },
        };

        match &outcome {
            StrictOutcome::Found { mint, snapshot } => info!(
                mint = %mint,
                source = snapshot.source.map(|s| s.tag()).unwrap_or("none"),
                "token_info resolved"
            ),
            _ => info!(address = address.trim(), "token_info exhausted all providers"),
        }
        outcome
    }
}

fn decide_strict(stage: Stage, outcome: ProviderOutcome, snapshot: &mut TokenSnapshot) -> ControlFlow<Verdict> {
    match outcome {
        ProviderOutcome::Success { fields, .. } => {
            match stage {
                Stage::Overview => snapshot.merge_all(stage, &fields),
                _ => snapshot.adopt_price(stage, fields.price),
            }
            snapshot.source = Some(stage);
            ControlFlow::Break(Verdict::Found)
        }
        ProviderOutcome::Unavailable { status, body, .. } => {
            let reason = Reason::rejected(stage, status, body);
            let message = reason.upstream_message().map(str::to_string);
            snapshot.reasons.push(reason);
            if stage == Stage::Price {
                ControlFlow::Break(Verdict::Exhausted(message))
            } else {
                ControlFlow::Continue(())
            }
        }
        ProviderOutcome::Error(msg) => {
            snapshot.reasons.push(Reason::failed(stage, msg));
            if stage == Stage::Price {
                ControlFlow::Break(Verdict::PriceFault)
            } else {
                ControlFlow::Continue(())
            }
        }
    }
}

/// Result of a lenient lookup
#[derive(Debug, Clone, PartialEq)]
pub enum LenientOutcome {
    InvalidMint(MintError),
    Profile { mint: Mint, snapshot: TokenSnapshot },
}

/// Best-effort aggregation: Birdeye price, Jupiter price, token list
#[derive(Clone)]
pub struct LenientLookup {
    has_api_key: bool,
    price: Arc<dyn ProviderPort>,
    secondary_price: Arc<dyn ProviderPort>,
    token_list: Arc<dyn ProviderPort>,
}

impl LenientLookup {
    pub fn new(
        has_api_key: bool,
        price: Arc<dyn ProviderPort>,
        secondary_price: Arc<dyn ProviderPort>,
        token_list: Arc<dyn ProviderPort>,
    ) -> Self {
        Self {
            has_api_key,
            price,
            secondary_price,
            token_list,
        }
    }

    pub async fn lookup(&self, candidate: &str) -> LenientOutcome {
        let mint = match Mint::parse(candidate) {
            Ok(m) => m,
            Err(e) => return LenientOutcome::InvalidMint(e),
        };

        let mut snapshot = TokenSnapshot::new();
        let mut attempts = Vec::with_capacity(3);

        if self.has_api_key {
            attempts.push(Attempt::always(Stage::Price, self.price.as_ref()));
        } else {
            snapshot.note(KEY_MISSING_NOTE);
        }
        attempts.push(Attempt::when(Stage::SecondaryPrice, self.secondary_price.as_ref(), |s| {
            !s.has_price()
        }));
        attempts.push(Attempt::always(Stage::TokenList, self.token_list.as_ref()));

        run_chain::<(), _>(&mint, attempts, &mut snapshot, decide_lenient).await;

        info!(
            mint = %mint,
            price = ?snapshot.fields.price,
            ok = snapshot.is_useful(),
            "token_info_rich assembled"
        );
        LenientOutcome::Profile { mint, snapshot }
    }
}

fn decide_lenient(stage: Stage, outcome: ProviderOutcome, snapshot: &mut TokenSnapshot) -> ControlFlow<()> {
    match stage {
        // a successful call without a record leaves price unset, silently
        Stage::SecondaryPrice => match outcome {
            ProviderOutcome::Success { fields, .. } => {
                snapshot.adopt_price(stage, fields.price);
                snapshot.sources.push(SourceRecord::ok(stage));
            }
            failed => {
                snapshot
                    .sources
                    .push(SourceRecord::ok(stage).with_error(&failed.describe()));
                snapshot.note(PRICE_UNAVAILABLE_NOTE);
            }
        },
        Stage::TokenList => match outcome {
            ProviderOutcome::Success { fields, .. } => {
                if fields.has_metadata() {
                    snapshot.merge_metadata(&fields);
                } else {
                    snapshot.note(META_MISSING_NOTE);
                }
                snapshot.sources.push(SourceRecord::ok(stage));
            }
            failed => {
                snapshot
                    .sources
                    .push(SourceRecord::ok(stage).with_error(&failed.describe()));
                snapshot.note(META_FETCH_FAILED_NOTE);
            }
        },
        Stage::Overview | Stage::Price => match outcome {
            ProviderOutcome::Success { status, fields } => {
                snapshot.merge_price(stage, &fields);
                snapshot.sources.push(SourceRecord::ok(stage).with_status(status));
            }
            ProviderOutcome::Unavailable { status, note, .. } => {
                snapshot
                    .sources
                    .push(SourceRecord::ok(stage).with_status(status).with_note(note));
            }
            ProviderOutcome::Error(msg) => {
                snapshot.sources.push(SourceRecord::ok(stage).with_error(&msg));
            }
        },
    }
    ControlFlow::Continue(())
}
