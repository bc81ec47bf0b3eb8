//! Upstream HTTP plumbing shared by the provider clients.
//!
//! One request, one bounded wait, one classified [`ProviderOutcome`]. The
//! classification is a pure function of status and body text so it can be
//! tested without a network.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::domain::fields::is_truthy;
use crate::domain::ProviderFields;
use crate::ports::ProviderOutcome;

/// Note for upstream refusals (auth, plan tier, rate limit)
pub const RATE_LIMIT_NOTE: &str = "rate-limit/plan";

/// Note for answers that did not signal success
pub const NO_SUCCESS_NOTE: &str = "no-success";

/// Errors building a provider client
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),
}

/// How an upstream signals a successful answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessSignal {
    /// 2xx and a truthy top-level `success` field (Birdeye)
    BodyFlag,
    /// 2xx and a decodable JSON body (Jupiter, token list)
    HttpStatus,
}

/// Build the shared HTTP client for a provider
pub fn build_http_client(timeout: Duration) -> Result<Client, ProviderError> {
    let http = Client::builder()
        .timeout(timeout)
        .user_agent(concat!("prophet-sol/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(http)
}

/// Reject base URLs that could never produce a request
pub fn check_url(url: &str) -> Result<(), ProviderError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ProviderError::InvalidUrl(url.to_string()))
    }
}

/// Send `request` and classify the answer. Never fails.
pub async fn fetch_outcome<F>(request: RequestBuilder, signal: SuccessSignal, extract: F) -> ProviderOutcome
where
    F: FnOnce(&Value) -> Result<ProviderFields, String>,
{
    let response = match request.header("accept", "application/json").send().await {
        Ok(r) => r,
        Err(e) => return ProviderOutcome::Error(e.to_string()),
    };

    let status = response.status();
    let text = match response.text().await {
        Ok(t) => t,
        Err(e) => return ProviderOutcome::Error(e.to_string()),
    };

    classify(status, &text, signal, extract)
}

/// Classify a raw upstream answer.
///
/// 401/403/429 bodies are never parsed; their shape is unreliable.
pub fn classify<F>(status: StatusCode, text: &str, signal: SuccessSignal, extract: F) -> ProviderOutcome
where
    F: FnOnce(&Value) -> Result<ProviderFields, String>,
{
    let code = status.as_u16();

    if is_refusal(status) {
        return ProviderOutcome::Unavailable {
            status: code,
            note: RATE_LIMIT_NOTE.to_string(),
            body: Value::String(text.to_string()),
        };
    }

    let body: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(_) => return no_success(code, Value::String(text.to_string())),
    };

    if !status.is_success() {
        return no_success(code, body);
    }

    if signal == SuccessSignal::BodyFlag {
        let flagged = body.get("success").map(is_truthy).unwrap_or(false);
        if !flagged {
            return no_success(code, body);
        }
    }

    match extract(&body) {
        Ok(fields) => ProviderOutcome::Success { status: code, fields },
        Err(e) => ProviderOutcome::Error(e),
    }
}

fn is_refusal(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    )
}

fn no_success(status: u16, body: Value) -> ProviderOutcome {
    ProviderOutcome::Unavailable {
        status,
        note: NO_SUCCESS_NOTE.to_string(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn price_of(body: &Value) -> Result<ProviderFields, String> {
        let price = body["data"]["value"].as_f64().ok_or("no value")?;
        Ok(ProviderFields::with_price(price))
    }

    #[test]
    fn test_refusals_skip_body_parsing() {
        for status in [401, 403, 429] {
            let outcome = classify(
                StatusCode::from_u16(status).unwrap(),
                r#"{"success": true, "data": {"value": 1.0}}"#,
                SuccessSignal::BodyFlag,
                |_| panic!("extract must not run"),
            );
            match outcome {
                ProviderOutcome::Unavailable { status: s, note, body } => {
                    assert_eq!(s, status);
                    assert_eq!(note, RATE_LIMIT_NOTE);
                    assert!(body.is_string());
                }
                other => panic!("expected Unavailable, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_undecodable_body() {
        let outcome = classify(StatusCode::OK, "<html>gateway</html>", SuccessSignal::BodyFlag, price_of);
        assert_eq!(
            outcome,
            ProviderOutcome::Unavailable {
                status: 200,
                note: NO_SUCCESS_NOTE.into(),
                body: json!("<html>gateway</html>"),
            }
        );
    }

    #[test]
    fn test_success_flag_false_keeps_body() {
        let text = r#"{"success": false, "message": "Not found"}"#;
        let outcome = classify(StatusCode::OK, text, SuccessSignal::BodyFlag, price_of);
        match outcome {
            ProviderOutcome::Unavailable { body, .. } => assert_eq!(body["message"], "Not found"),
            other => panic!("expected Unavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_success_flag_absent() {
        let outcome = classify(StatusCode::OK, r#"{"data": {"value": 2.0}}"#, SuccessSignal::BodyFlag, price_of);
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_http_status_signal_ignores_flag() {
        let outcome = classify(StatusCode::OK, r#"{"data": {"value": 2.0}}"#, SuccessSignal::HttpStatus, price_of);
        assert_eq!(outcome, ProviderOutcome::success(ProviderFields::with_price(2.0)));
    }

    #[test]
    fn test_server_error_is_unavailable() {
        let outcome = classify(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"success": false}"#,
            SuccessSignal::HttpStatus,
            price_of,
        );
        assert!(matches!(outcome, ProviderOutcome::Unavailable { status: 500, .. }));
    }

    #[test]
    fn test_extract_failure_is_error() {
        let outcome = classify(StatusCode::OK, r#"{"data": {}}"#, SuccessSignal::HttpStatus, price_of);
        assert_eq!(outcome, ProviderOutcome::Error("no value".into()));
    }

    #[test]
    fn test_check_url() {
        assert!(check_url("https://public-api.birdeye.so").is_ok());
        assert!(check_url("http://127.0.0.1:9000").is_ok());
        assert!(matches!(check_url("public-api.birdeye.so"), Err(ProviderError::InvalidUrl(_))));
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(Duration::from_secs(8)).is_ok());
    }
}
