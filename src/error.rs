//! Error types for newsdesk
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error types (Database, Source)
//! - Transparent conversions from the underlying sqlx/reqwest/serde errors
//!
//! Fetch failures propagate to the caller with the existing article list left
//! untouched; recovery policy (retry/backoff) belongs to the embedding
//! application, not this layer.

use thiserror::Error;

/// Result type alias for newsdesk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for newsdesk
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "database_path")
        key: Option<String>,
    },

    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLx database error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Article feed error
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Database-related errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to connect to database
    #[error("failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to run migrations
    #[error("failed to run migrations: {0}")]
    MigrationFailed(String),

    /// Query failed
    #[error("query failed: {0}")]
    QueryFailed(String),
}

/// Article feed errors
#[derive(Debug, Error)]
pub enum SourceError {
    /// Feed endpoint answered with a non-success HTTP status
    #[error("feed request failed with status {status}")]
    RequestFailed {
        /// The HTTP status code returned by the feed endpoint
        status: u16,
    },

    /// Feed payload could not be decoded
    #[error("invalid feed payload: {0}")]
    InvalidPayload(String),
}
