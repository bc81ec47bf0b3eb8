//! Web Adapter
//!
//! Thin axum layer over the lookup orchestrator: `/token_info` (strict),
//! `/token_info_rich` (lenient) plus health and debug routes.

mod routes;
mod server;
mod state;

pub use routes::{build_router, AnalyzeRequest, TokenInfoQuery, TokenInfoRichRequest};
pub use server::{start_server, ServerError};
pub use state::AppState;
