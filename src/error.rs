//! Error types for the Pokedex client
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised while building an expiring cache.
///
/// Reads and writes on a running cache cannot fail, so construction is the
/// only place this type appears.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// TTL must be a positive duration
    #[error("Invalid TTL: {0:?} (must be greater than zero)")]
    InvalidTtl(Duration),
}

// == Pokedex Error Enum ==
/// Unified error type for the API client and REPL commands.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Response failed with status code {status} for {url}")]
    Status { url: String, status: u16 },

    /// Response body did not match the expected schema
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Terminal I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache could not be constructed
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// REPL input named no known command
    #[error("Unknown command")]
    UnknownCommand(String),

    /// REPL command given without its required argument
    #[error("Usage: {0}")]
    MissingArgument(&'static str),
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex client.
pub type Result<T> = std::result::Result<T, PokedexError>;
