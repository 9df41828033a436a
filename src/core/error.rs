//! Error types and error handling for the Tawfiq service.
//!
//! This module defines the error types used throughout the
//! application. HTTP status mapping lives in the `http` adapter.
//!
//! The taxonomy is deliberately small: empty retrieval results
//! ("no such surah", "no matching hadith") are *not* errors and
//! never appear here; they are valid responses shaped by the
//! handlers. Provider failures are absorbed inside the completion
//! gateway and never surface as a `TawfiqError` either.

use thiserror::Error;

/// Result type alias for Tawfiq operations
pub type Result<T> = std::result::Result<T, TawfiqError>;

/// Main error type for the Tawfiq service
#[derive(Error, Debug)]
pub enum TawfiqError {
    #[error("Invalid conversation history: {0}")]
    InvalidHistory(String),

    #[error("Corpus load failed: {0}")]
    CorpusLoad(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl TawfiqError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a bad request error (invalid client input)
    pub fn is_bad_request(&self) -> bool {
        matches!(self, TawfiqError::InvalidHistory(_))
    }
}
