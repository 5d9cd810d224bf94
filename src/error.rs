//! Error types for the listing fetcher
//!
//! Every public API returns `Result<T, Error>` where Error is defined here.
//! Nothing in the crate recovers locally: failures propagate to the caller
//! with `?` and abort the current request or pagination loop.

use thiserror::Error;

/// Fixed message attached to every non-200 upstream response
pub const REQUEST_FAILED_MESSAGE: &str = "upstream request failed";

/// The main error type for the listing fetcher
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    // ============================================================================
    // Request Errors
    // ============================================================================
    /// Upstream answered with anything other than 200
    #[error("{message} (HTTP {status}): {body}")]
    Request {
        status: u16,
        body: String,
        message: String,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Transport error: {message}")]
    TransportFailure { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Pagination stopped after {max_pages} pages ({collected} items collected) with a continuation token still pending")]
    PaginationLimitExceeded { max_pages: u32, collected: usize },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a request error for a non-200 status
    pub fn request(status: u16, body: impl Into<String>) -> Self {
        Self::Request {
            status,
            body: body.into(),
            message: REQUEST_FAILED_MESSAGE.to_string(),
        }
    }

    /// Create a transport error from a message
    pub fn transport(message: impl Into<String>) -> Self {
        Self::TransportFailure {
            message: message.into(),
        }
    }

    /// Upstream status code, if this error came from a non-200 response
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Request { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the error was raised by the pagination safety bound
    pub fn is_pagination_limit(&self) -> bool {
        matches!(self, Error::PaginationLimitExceeded { .. })
    }
}

/// Result type alias for the listing fetcher
pub type Result<T> = std::result::Result<T, Error>;
