//! Response handling shared by the HTTP backends.

use reqwest::{Response, StatusCode};
use std::time::Duration;
use tracing::warn;

use crate::error::{Error, Result};
use crate::provider::ProviderId;

/// Build the client shared by every backend.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::ConfigInvalid {
            field: "http client".to_string(),
            reason: e.to_string(),
        })
}

/// Map a transport-level failure.
pub fn send_error(provider: ProviderId, e: &reqwest::Error, timeout: Duration) -> Error {
    warn!("{} request failed: {}", provider, e);
    if e.is_timeout() {
        Error::BackendTimeout {
            provider,
            seconds: timeout.as_secs(),
        }
    } else {
        Error::BackendRequest {
            provider,
            reason: e.to_string(),
        }
    }
}

/// Pass successful responses through; turn everything else into an error.
pub async fn check_status(provider: ProviderId, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        warn!("{} rate limited, retry after {:?}s", provider, retry_after);
        return Err(Error::BackendRateLimited {
            provider,
            retry_after,
        });
    }

    let body = response.text().await.unwrap_or_default();
    warn!("{} API error: {} - {}", provider, status, body);
    Err(Error::BackendRequest {
        provider,
        reason: format!("HTTP {status}: {body}"),
    })
}

/// Reject blank completions so the dispatcher falls back instead of
/// showing an empty translation. Non-blank text is returned as-is.
pub fn non_empty(provider: ProviderId, text: &str) -> Result<String> {
    if text.trim().is_empty() {
        Err(Error::BackendInvalidResponse {
            provider,
            reason: "empty completion".to_string(),
        })
    } else {
        Ok(text.to_string())
    }
}
