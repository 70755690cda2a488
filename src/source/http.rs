use anyhow::{Context, Result};
use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};

use super::DocumentSource;
use crate::diag;

/// JSON document fetched over HTTP(S)
pub struct HttpDocument {
    url: String,
    client: reqwest::Client,
}

/// The server answered with an error status
#[derive(Debug)]
struct StatusError {
    url: String,
    status: StatusCode,
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fetching {} returned HTTP {}", self.url, self.status)
    }
}

impl std::error::Error for StatusError {}

/// Transport failures, 5xx and 429 may succeed on a later attempt; other 4xx will not
fn is_retryable(err: &anyhow::Error) -> bool {
    match err.downcast_ref::<StatusError>() {
        Some(e) => e.status.is_server_error() || e.status == StatusCode::TOO_MANY_REQUESTS,
        None => true,
    }
}

impl HttpDocument {
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("folio-dash/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { url, client })
    }

    async fn fetch_once(&self) -> Result<Option<String>> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", self.url))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(StatusError {
                url: self.url.clone(),
                status,
            }
            .into());
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", self.url))?;
        Ok(Some(body))
    }
}

impl DocumentSource for HttpDocument {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Option<String>> {
        // Retry strategy: exponential backoff with 3 attempts
        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(2))
            .take(3);

        diag!("Fetching configuration document {}", self.url);
        RetryIf::spawn(retry_strategy, || self.fetch_once(), is_retryable).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: StatusCode) -> anyhow::Error {
        StatusError {
            url: "https://example.com/portfolio-complete.json".to_string(),
            status,
        }
        .into()
    }

    #[test]
    fn test_client_errors_are_final() {
        assert!(!is_retryable(&status_error(StatusCode::UNAUTHORIZED)));
        assert!(!is_retryable(&status_error(StatusCode::FORBIDDEN)));
        assert!(!is_retryable(&status_error(StatusCode::BAD_REQUEST)));
    }

    #[test]
    fn test_server_errors_and_throttling_retried() {
        assert!(is_retryable(&status_error(StatusCode::BAD_GATEWAY)));
        assert!(is_retryable(&status_error(StatusCode::SERVICE_UNAVAILABLE)));
        assert!(is_retryable(&status_error(StatusCode::TOO_MANY_REQUESTS)));
    }

    #[test]
    fn test_transport_errors_retried() {
        let err = anyhow::anyhow!("connection refused").context("Failed to fetch");
        assert!(is_retryable(&err));
    }

    #[test]
    fn test_status_error_message() {
        let err = status_error(StatusCode::FORBIDDEN);
        assert_eq!(
            err.to_string(),
            "Fetching https://example.com/portfolio-complete.json returned HTTP 403 Forbidden"
        );
    }
}
