//! HTTP client for the disclosure dump endpoints.

use crate::error::FeedError;
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = "capitol-trade/0.1 (research tool)";

const MAX_ATTEMPTS: u32 = 3;

/// Fetches disclosure JSON with bounded retry and exponential backoff.
pub struct DisclosureClient {
    http: reqwest::Client,
}

impl DisclosureClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FeedError::Network(e.to_string()))?;
        Ok(Self { http })
    }

    /// Fetches a JSON array of raw disclosure items.
    ///
    /// Transient failures are retried up to three attempts with 1s/2s
    /// backoff; the last error is returned on exhaustion. Endpoints that
    /// wrap the list in a `{"data": [...]}` envelope are unwrapped.
    ///
    /// # Errors
    ///
    /// Returns the final [`FeedError`] once retries are exhausted or on the
    /// first permanent failure.
    pub async fn fetch_items(&self, url: &str) -> Result<Vec<Value>, FeedError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_fetch(url).await {
                Ok(items) => return Ok(items),
                Err(err) if attempt < MAX_ATTEMPTS && err.is_transient() => {
                    let delay = Duration::from_secs(1 << (attempt - 1));
                    tracing::warn!(
                        url,
                        attempt,
                        error = %err,
                        "fetch failed, retrying in {}s",
                        delay.as_secs()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<Vec<Value>, FeedError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body: Value = response.json().await.map_err(|e| FeedError::Payload {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        match body {
            Value::Array(items) => Ok(items),
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(items)) => Ok(items),
                _ => Err(FeedError::Payload {
                    url: url.to_string(),
                    message: "expected a JSON array or a data envelope".to_string(),
                }),
            },
            _ => Err(FeedError::Payload {
                url: url.to_string(),
                message: "expected a JSON array".to_string(),
            }),
        }
    }
}
