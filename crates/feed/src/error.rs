//! Error types for the disclosure feed.

use thiserror::Error;

/// Errors raised while fetching disclosure dumps.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network-level failure reaching the endpoint.
    #[error("network error: {0}")]
    Network(String),

    /// The request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned {status}: {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The URL that was fetched.
        url: String,
    },

    /// The endpoint answered with something that is not a disclosure list.
    #[error("invalid payload from {url}: {message}")]
    Payload {
        /// The URL that was fetched.
        url: String,
        /// What was wrong with the body.
        message: String,
    },
}

impl FeedError {
    /// True when retrying the same request may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Payload { .. } => false,
        }
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Network(format!("connection failed: {err}"))
        } else {
            Self::Network(err.to_string())
        }
    }
}
