//! Error types for Marquee operations.
//!
//! Two error families are kept apart. [`ExtractError`] describes a mismatch between a theater's configuration and
//! the markup it received, and is absorbed by [`crate::Theater::movies`].
//! Everything else in [`MarqueeError`] (transport, I/O, malformed
//! configuration, persistence) reaches the caller.
//!
//! # Example
//!
//! ```rust
//! use marquee_core::{MarqueeError, Result};
//!
//! fn require_name(name: &str) -> Result<&str> {
//!     if name.is_empty() {
//!         return Err(MarqueeError::MissingField("theater_name"));
//!     }
//!     Ok(name)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// A theater's selector or pattern did not line up with the fetched markup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The list selector matched no nodes in the document.
    #[error("selector `{selector}` matched no elements")]
    NoMatches { selector: String },

    /// The text search pattern did not match the concatenated node text.
    #[error("text search `{pattern}` did not match")]
    PatternMismatch { pattern: String },

    /// The pattern matched but its first capture group did not participate.
    #[error("text search `{pattern}` matched without capturing a title list")]
    MissingCapture { pattern: String },
}

/// Main error type for Marquee operations.
#[derive(Error, Debug)]
pub enum MarqueeError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps network errors, DNS failures, connection issues and
    /// non-success status codes.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Standard I/O errors for reading sources and writing records.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A list selector that cannot be parsed as CSS.
    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// A text search pattern that is not a valid single-capture regex.
    #[error("Invalid text search `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A required theater field was empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Theater configuration files that are missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Selector or pattern mismatch against the fetched markup.
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    /// Saved theater records that cannot be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A saved theater record written by a newer format revision.
    #[error("Unsupported record version {found} (supported up to {supported})")]
    UnsupportedRecordVersion { found: u32, supported: u32 },
}

impl MarqueeError {
    /// Whether this error belongs to the configuration/markup mismatch class.
    pub fn is_extraction(&self) -> bool {
        matches!(self, MarqueeError::Extraction(_))
    }
}

/// Result type alias for MarqueeError.
pub type Result<T> = std::result::Result<T, MarqueeError>;
