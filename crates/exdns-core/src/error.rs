//! Error types for the webhook provider
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the webhook provider
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (fatal at construction)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data returned by the provider or supplied by the orchestrator
    /// that cannot be interpreted (TTL, record id, missing targets)
    #[error("Malformed data: {0}")]
    MalformedData(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport errors (from the provider API)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Record or zone not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Provider-specific error
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// A mutating call failed for a specific record
    #[error("unable to {operation} record {record}: {source}")]
    Apply {
        /// The operation that failed ("create", "update" or "delete")
        operation: &'static str,
        /// Human-readable description of the record
        record: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// Reading the records of a zone failed
    #[error("unable to query DNS records for zone '{zone}': {source}")]
    ZoneQuery {
        /// Zone that was queried
        zone: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a malformed data error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedData(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Wrap a failed mutating call with the operation and record it concerned
    pub fn apply(operation: &'static str, record: impl Into<String>, source: Error) -> Self {
        Self::Apply {
            operation,
            record: record.into(),
            source: Box::new(source),
        }
    }

    /// Wrap a failed zone listing with the zone name
    pub fn zone_query(zone: impl Into<String>, source: Error) -> Self {
        Self::ZoneQuery {
            zone: zone.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error (or the error it wraps) is a local data problem
    /// rather than a remote failure
    pub fn is_malformed(&self) -> bool {
        match self {
            Self::MalformedData(_) => true,
            Self::Apply { source, .. } | Self::ZoneQuery { source, .. } => source.is_malformed(),
            _ => false,
        }
    }
}
