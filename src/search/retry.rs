//! Bounded retry over transient network failures
//!
//! Each page request gets one attempt per timeout budget, in order. Timeouts
//! and connection failures advance to the next budget; every other failure is
//! terminal for the run. Exhausting all budgets is its own distinct error,
//! never a silent empty result.

use std::time::Duration;

use tracing::warn;
use url::Url;

use crate::error::{Error, Result};

use super::transport::{FetchError, RawResponse, Transport};
use super::SearchPage;

/// Per-attempt timeout budgets, in seconds.
const ATTEMPT_TIMEOUT_SECS: [u64; 4] = [8, 16, 32, 128];

/// Fetch and parse one result page, retrying transient failures once per
/// timeout budget.
pub async fn fetch_page<T: Transport + ?Sized>(transport: &T, url: &Url) -> Result<SearchPage> {
    for (attempt, secs) in ATTEMPT_TIMEOUT_SECS.into_iter().enumerate() {
        match transport.fetch(url, Duration::from_secs(secs)).await {
            Ok(response) => return interpret(response),
            Err(FetchError::Timeout) => {
                warn!(
                    "Retry number {attempt}: request {url} timed out after {secs} secs, \
                     trying again until retry count limit is reached"
                );
            }
            Err(FetchError::Connect) => {
                warn!(
                    "Retry number {attempt}: cannot connect to {url}, \
                     trying again until retry count limit is reached"
                );
            }
            Err(FetchError::Other(msg)) => {
                return Err(Error::UnexpectedResponse(msg));
            }
        }
    }
    Err(Error::RetriesExhausted {
        attempts: ATTEMPT_TIMEOUT_SECS.len(),
    })
}

/// Map a completed HTTP exchange to a parsed page or a terminal error.
fn interpret(response: RawResponse) -> Result<SearchPage> {
    match response.status {
        200 => serde_json::from_str(&response.body).map_err(|e| {
            Error::UnexpectedResponse(format!("failed to parse search results: {e}"))
        }),
        304 => Err(api_error(
            304,
            "not modified: probably some issue on the server side",
        )),
        403 => Err(api_error(
            403,
            "forbidden: probably the authentication token is incorrect or expired",
        )),
        422 => Err(api_error(
            422,
            "wrong query format or the endpoint has been spammed",
        )),
        503 => Err(api_error(
            503,
            "service is unavailable, probably the server is down",
        )),
        status => Err(Error::UnexpectedResponse(format!(
            "unexpected status code {status}"
        ))),
    }
}

fn api_error(status: u16, cause: &str) -> Error {
    Error::Api {
        status,
        cause: cause.to_string(),
    }
}
