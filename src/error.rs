//! Error handling for the PitchBoard client

use std::fmt;
use thiserror::Error;

/// Fallback message when neither the server nor the transport layer
/// supplied anything human-readable.
const GENERIC_FAILURE: &str = "Something went wrong";

/// Unified error type for the PitchBoard client
#[derive(Error, Debug)]
pub enum Error {
    /// Client-side field validation failed before any request was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or rejected bearer token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The server rejected the request with an error payload
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new unauthorized error
    pub fn unauthorized<T: fmt::Display>(msg: T) -> Self {
        Error::Unauthorized(msg.to_string())
    }

    /// Create a new not-found error
    pub fn not_found<T: fmt::Display>(msg: T) -> Self {
        Error::NotFound(msg.to_string())
    }

    /// The message a view layer should surface for this failure.
    ///
    /// Precedence: server-supplied error text, else transport error text,
    /// else a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(msg) | Error::Unauthorized(msg) | Error::NotFound(msg) => {
                msg.clone()
            }
            Error::Server { message, .. } => {
                if message.is_empty() {
                    GENERIC_FAILURE.to_string()
                } else {
                    message.clone()
                }
            }
            Error::Http(err) => err.to_string(),
            Error::Json(err) => err.to_string(),
            Error::Url(err) => err.to_string(),
        }
    }
}
