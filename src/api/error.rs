//! Error types for the countries API client.

use thiserror::Error;

use crate::api::endpoint::Endpoint;

/// Errors that can occur while fetching or decoding country data.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to build the HTTP client
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Request could not be sent or the body could not be read
    #[error("Request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Remote API answered with a non-success status
    #[error("'{url}' returned HTTP {status}")]
    Status { status: u16, url: String },

    /// Response body did not match the expected shape
    #[error("Failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },

    /// Response array was empty where one record was expected
    #[error("{endpoint} returned no records")]
    EmptyResponse { endpoint: Endpoint },

    /// Request exceeded the configured timeout
    #[error("Request timeout after {seconds}s")]
    Timeout { seconds: u64 },

    /// The fetch owning an in-flight entry was dropped before completing
    #[error("Request was cancelled")]
    Cancelled,
}

impl ApiError {
    /// Short machine-readable kind, used as a tracing field.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::ClientBuild(_) => "client_build",
            ApiError::Transport { .. } => "transport",
            ApiError::Status { .. } => "status",
            ApiError::Decode { .. } => "decode",
            ApiError::EmptyResponse { .. } => "empty_response",
            ApiError::Timeout { .. } => "timeout",
            ApiError::Cancelled => "cancelled",
        }
    }

    /// True when the remote answered 404, which the search endpoint uses for "no match".
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}
