//! Transport error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection, TLS or protocol failure before a status was received
    #[error("HTTP error calling {method} {path}: {source}")]
    Http {
        method: String,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a status outside [200, 300)
    #[error("API Error {status}: {reason} | Body: {body}")]
    Status {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request signing failed: {0}")]
    Signing(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl ClientError {
    /// HTTP status code, when the failure came from the API itself
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
