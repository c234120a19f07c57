//! Error types for the AutoDNS workspace
//!
//! Every failure is returned to the immediate caller. Nothing is retried
//! and nothing is swallowed.

use thiserror::Error;

/// Result type alias for AutoDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type shared by the client, the memory backend and the
/// lifecycle adapters
#[derive(Error, Debug)]
pub enum Error {
    /// Zone identifier is not `origin@virtualNameServer`
    ///
    /// Raised before any request is built.
    #[error("invalid zone id '{0}': the zone id must have the format origin@virtualNameServer")]
    InvalidZoneId(String),

    /// Network, TLS or timeout failure (message is the transport's own)
    #[error("transport error: {0}")]
    Transport(String),

    /// API answered with something other than 200 OK
    #[error("status: {status}, body: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// 200 OK whose body is not a `{"data": [...]}` envelope
    #[error("failed to decode API response: {0}")]
    Decode(String),

    /// A lookup expected to be unique returned zero or several results
    #[error("lookup failed: {0}")]
    Lookup(String),

    /// Record set not present in the zone
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid input from the host (import ids, zone moves)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Request body could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid zone id error
    pub fn invalid_zone_id(zone_id: impl Into<String>) -> Self {
        Self::InvalidZoneId(zone_id.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an API status error
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a lookup error
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status of an API error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
