//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks (404, 400 with Bitbucket's error envelope,
//! 429 with `Retry-After`, other non-success → [`BitbucketError::Api`]) so the
//! endpoint modules stay focused on request construction and mapping.

use crate::error::BitbucketError;

#[derive(serde::Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(serde::Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Check an HTTP response for common error conditions.
///
/// `what` names the requested object for not-found errors.
pub async fn check_response(
    resp: reqwest::Response,
    what: &str,
) -> Result<reqwest::Response, BitbucketError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == 429 {
        return Err(BitbucketError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if status == 404 {
        return Err(BitbucketError::NotFound(what.to_string()));
    }
    let body = resp.text().await.unwrap_or_default();
    let message = error_message(&body);
    if status == 400 {
        return Err(BitbucketError::Rejected(message));
    }
    Err(BitbucketError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Pull the human-readable message out of Bitbucket's error envelope.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
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
                .body(String::new())
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
        let resp = mock_response_with_retry_after(429, "soon");
        assert_eq!(parse_retry_after(&resp), 60);
    }

    #[tokio::test]
    async fn not_found_names_the_object() {
        let err = check_response(mock_response(404, ""), "pull request #7")
            .await
            .unwrap_err();
        assert!(matches!(err, BitbucketError::NotFound(what) if what == "pull request #7"));
    }

    #[tokio::test]
    async fn bad_request_extracts_envelope_message() {
        let body = r#"{"type": "error", "error": {"message": "title: This field is required."}}"#;
        let err = check_response(mock_response(400, body), "pull request")
            .await
            .unwrap_err();
        assert!(
            matches!(err, BitbucketError::Rejected(message) if message == "title: This field is required.")
        );
    }

    #[tokio::test]
    async fn server_error_keeps_raw_body() {
        let err = check_response(mock_response(502, "bad gateway"), "repository")
            .await
            .unwrap_err();
        assert!(
            matches!(err, BitbucketError::Api { status: 502, message } if message == "bad gateway")
        );
    }

    #[tokio::test]
    async fn rate_limit_default() {
        let err = check_response(mock_response(429, ""), "repository")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BitbucketError::RateLimited {
                retry_after_secs: 60
            }
        ));
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(mock_response(200, "{}"), "x").await.is_ok());
    }
}
