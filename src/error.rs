//! Error types for the ThingSpeak client library.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for all ThingSpeak client operations.
#[derive(Error, Debug)]
pub enum ThingSpeakError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// The service answered a read request with a non-success status
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code returned by the service
        status: reqwest::StatusCode,
        /// Raw response body
        body: String,
    },

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response body could not be decoded into a value tree
    #[error("Malformed response: {message}. Body: {body}")]
    MalformedResponse {
        /// Parser error message
        message: String,
        /// Raw response body
        body: String,
    },

    /// Request parameters could not be encoded
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Client was configured without something an operation needs
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Key-store file does not exist
    #[error("API key file not found: {}", path.display())]
    KeyStoreNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Key-store file could not be read or written
    #[error("API key file error ({}): {source}", path.display())]
    KeyStore {
        /// Path of the key-store file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O error outside of the key-store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ThingSpeakError {
    /// Check if this error came from the HTTP transport or a non-success status.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::HttpMiddleware(_) | Self::Status { .. } | Self::Url(_)
        )
    }

    /// Check if this error is a client configuration problem.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_) | Self::KeyStoreNotFound { .. } | Self::KeyStore { .. }
        )
    }

    /// Check if this error is an undecodable response body.
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }

    /// The HTTP status code, if the service returned one.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            Self::HttpMiddleware(reqwest_middleware::Error::Reqwest(e)) => e.status(),
            _ => None,
        }
    }
}
