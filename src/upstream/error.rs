use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single upstream call
///
/// None of these are retried; the page that needed the data fails.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("malformed payload from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{url} reported error {code}: {message}")]
    Service {
        url: String,
        code: i64,
        message: String,
    },
}

impl UpstreamError {
    pub fn url(&self) -> &str {
        match self {
            UpstreamError::Transport { url, .. }
            | UpstreamError::Status { url, .. }
            | UpstreamError::Decode { url, .. }
            | UpstreamError::Service { url, .. } => url,
        }
    }
}
