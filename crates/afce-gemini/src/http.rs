//! Shared HTTP response checks.
//!
//! 429 becomes [`GeminiError::RateLimited`] (honouring `Retry-After`), 401/403
//! become [`GeminiError::Unauthorized`], anything else non-success becomes
//! [`GeminiError::Api`] carrying the Google error message when one is present.

use serde::Deserialize;

use crate::error::GeminiError;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, GeminiError> {
    let status = resp.status();
    if status == 429 {
        return Err(GeminiError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if status == 401 || status == 403 {
        return Err(GeminiError::Unauthorized);
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(GeminiError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

/// `error.message` from a Google error envelope, else the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map_or_else(|_| body.to_string(), |envelope| envelope.error.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    fn mock_response_with_retry_after(status: u16, value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("Retry-After", value)
                .body("")
                .unwrap(),
        )
    }

    #[test]
    fn parse_retry_after_from_header() {
        let resp = mock_response_with_retry_after(429, "120");
        assert_eq!(parse_retry_after(&resp), 120);
    }

    #[test]
    fn parse_retry_after_non_numeric() {
        let resp = mock_response_with_retry_after(429, "Wed, 21 Oct 2026 07:28:00 GMT");
        assert_eq!(parse_retry_after(&resp), 60);
    }

    #[tokio::test]
    async fn check_response_rate_limited_default() {
        let err = check_response(mock_response(429, "")).await.unwrap_err();
        assert!(matches!(
            err,
            GeminiError::RateLimited {
                retry_after_secs: 60
            }
        ));
    }

    #[tokio::test]
    async fn check_response_unauthorized() {
        for status in [401, 403] {
            let err = check_response(mock_response(status, "")).await.unwrap_err();
            assert!(matches!(err, GeminiError::Unauthorized));
        }
    }

    #[tokio::test]
    async fn check_response_extracts_google_error_message() {
        let body = r#"{"error":{"code":400,"message":"Invalid JSON payload","status":"INVALID_ARGUMENT"}}"#;
        let err = check_response(mock_response(400, body)).await.unwrap_err();
        match err {
            GeminiError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid JSON payload");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn check_response_keeps_plain_body() {
        let err = check_response(mock_response(503, "upstream overloaded"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GeminiError::Api { status: 503, ref message } if message == "upstream overloaded"
        ));
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(200, "{}")).await.is_ok());
    }
}
