//! HTTP plumbing shared by the provider adapters.

use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

use crate::ports::ProviderError;

/// Longest slice of an error body carried into a `ProviderError`.
const MAX_ERROR_BODY: usize = 512;

/// Builds a client with a request timeout.
///
/// Falls back to a default client if the TLS backend cannot be initialised
/// with custom settings; the orchestrator still bounds every call.
pub(crate) fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}

/// Maps a reqwest send error to a provider error.
pub(crate) fn send_error(err: reqwest::Error, timeout: Duration) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout {
            timeout_secs: timeout.as_secs(),
        }
    } else if err.is_connect() {
        ProviderError::network(format!("Connection failed: {}", err))
    } else {
        ProviderError::network(err.to_string())
    }
}

/// Passes successful responses through and classifies the rest.
pub(crate) async fn check_status(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify(status, body))
}

/// Maps a non-success status and its body to a provider error.
fn classify(status: StatusCode, mut body: String) -> ProviderError {
    if body.len() > MAX_ERROR_BODY {
        let cut = (0..=MAX_ERROR_BODY)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        body.truncate(cut);
    }

    match status.as_u16() {
        401 | 403 => ProviderError::AuthenticationFailed,
        429 => ProviderError::RateLimited(body),
        400 | 404 | 422 => ProviderError::InvalidRequest(format!("{}: {}", status, body)),
        500..=599 => ProviderError::unavailable(format!("Server error {}: {}", status, body)),
        _ => ProviderError::network(format!("Unexpected status {}: {}", status, body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_maps_to_authentication_failed() {
        let err = classify(StatusCode::UNAUTHORIZED, "bad key".to_string());
        assert_eq!(err, ProviderError::AuthenticationFailed);
    }

    #[test]
    fn too_many_requests_maps_to_rate_limited() {
        let err = classify(StatusCode::TOO_MANY_REQUESTS, "slow down".to_string());
        assert_eq!(err, ProviderError::RateLimited("slow down".to_string()));
    }

    #[test]
    fn bad_request_maps_to_invalid_request() {
        let err = classify(StatusCode::BAD_REQUEST, "model not found".to_string());
        assert!(matches!(err, ProviderError::InvalidRequest(_)));
    }

    #[test]
    fn server_error_maps_to_unavailable() {
        let err = classify(StatusCode::BAD_GATEWAY, "oops".to_string());
        assert!(matches!(err, ProviderError::Unavailable(_)));
    }

    #[test]
    fn unexpected_status_maps_to_network() {
        let err = classify(StatusCode::IM_A_TEAPOT, String::new());
        assert!(matches!(err, ProviderError::Network(_)));
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let err = classify(StatusCode::TOO_MANY_REQUESTS, "x".repeat(4096));
        match err {
            ProviderError::RateLimited(msg) => assert_eq!(msg.len(), MAX_ERROR_BODY),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let err = classify(StatusCode::TOO_MANY_REQUESTS, "é".repeat(400));
        match err {
            ProviderError::RateLimited(msg) => assert!(msg.len() <= MAX_ERROR_BODY),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
