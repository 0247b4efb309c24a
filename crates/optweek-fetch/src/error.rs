//! Error type for broker and feed access.

use optweek_types::OptweekError;
use thiserror::Error;

/// Errors that can occur while talking to the broker.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server kept failing after all retries.
    #[error("Server error: {status}")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },

    /// The broker answered with an error envelope.
    #[error("{error_type} ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Broker exception class (e.g. `TokenException`).
        error_type: String,
        /// Human readable message.
        message: String,
    },

    /// Response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value in the response was malformed.
    #[error(transparent)]
    Data(#[from] OptweekError),

    /// An authenticated call was made before a session exists.
    #[error("no access token, log in first")]
    MissingAccessToken,
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<csv::Error> for FetchError {
    fn from(e: csv::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
