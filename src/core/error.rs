//! Error types for resource pricing and chain lookups

use crate::core::asset::AssetParseError;
use thiserror::Error;

/// Failure while talking to the chain API.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request error: {source} for URL: {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error: {status} for URL: {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to parse JSON response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed amount in {field}: {source}")]
    MalformedAmount {
        field: &'static str,
        #[source]
        source: AssetParseError,
    },

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] FetchError),
}

impl PricingError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        PricingError::InvalidInput(msg.into())
    }
}
