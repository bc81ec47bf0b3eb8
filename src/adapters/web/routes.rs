//! HTTP route handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use super::state::AppState;
use crate::application::{response, Rendered};

/// Build the full router with middleware
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/env_debug", get(env_debug))
        .route("/analyze", post(analyze))
        .route("/token_info", get(token_info))
        .route("/token_info_rich", post(token_info_rich))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn reply(rendered: Rendered) -> Response {
    let status = StatusCode::from_u16(rendered.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(rendered.body)).into_response()
}

/// GET / - service banner
async fn root() -> Json<Value> {
    Json(json!({"message": "Prophecy service is running"}))
}

/// GET /health - no upstream dependencies
async fn health() -> Json<Value> {
    Json(json!({"ok": true}))
}

/// GET /env_debug - whether the Birdeye key was loaded and which base URL is used
async fn env_debug(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "env_path_exists": state.env_file_found,
        "key_loaded": state.key_loaded,
        "base": state.birdeye_base,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub input: String,
}

/// POST /analyze - demo placeholder prophecy
async fn analyze(Json(req): Json<AnalyzeRequest>) -> Json<Value> {
    let q = req.input.trim();
    let prophecy = format!(
        "Omens for '{}': early phase. Check pure liquidity, holder distribution, DEX momentum.",
        q
    );
    Json(json!({"ok": true, "input": q, "prophecy": prophecy}))
}

#[derive(Debug, Deserialize)]
pub struct TokenInfoQuery {
    pub address: String,
}

/// GET /token_info?address=<mint> - overview, falling back to price
///
/// A missing `address` is answered as an invalid mint.
async fn token_info(
    State(state): State<AppState>,
    query: Result<Query<TokenInfoQuery>, QueryRejection>,
) -> Response {
    let address = match query {
        Ok(Query(q)) => q.address,
        Err(rejection) => {
            debug!("token_info query rejected: {}", rejection);
            String::new()
        }
    };
    let outcome = state.strict.lookup(&address).await;
    reply(response::strict(&outcome))
}

#[derive(Debug, Deserialize)]
pub struct TokenInfoRichRequest {
    #[serde(default)]
    pub mint: String,
}

/// POST /token_info_rich - best-effort profile, always 200 for a valid mint
///
/// Bodies that are not JSON, or carry a non-string `mint`, get the same 400
/// shape as an invalid mint.
async fn token_info_rich(
    State(state): State<AppState>,
    body: Result<Json<TokenInfoRichRequest>, JsonRejection>,
) -> Response {
    let mint = match body {
        Ok(Json(req)) => req.mint,
        Err(rejection) => {
            debug!("token_info_rich body rejected: {}", rejection);
            String::new()
        }
    };
    let outcome = state.lenient.lookup(&mint).await;
    reply(response::lenient(&outcome))
}
