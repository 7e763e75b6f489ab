//! Error types for Verkehr operations.
//!
//! This module defines the main error type [`VerkehrError`]. Only document
//! loading can fail: extraction and date normalization degrade to empty
//! results or `None` fields instead of returning errors.
//!
//! # Example
//!
//! ```rust
//! use verkehr_core::{VerkehrError, Result};
//!
//! fn require_html(html: &str) -> Result<&str> {
//!     if html.is_empty() {
//!         return Err(VerkehrError::InvalidUrl("empty source".to_string()));
//!     }
//!     Ok(html)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for loading traffic pages.
///
/// The network variants (`HttpError`, `HttpStatus`, `Timeout`, `InvalidUrl`)
/// are grouped by [`VerkehrError::is_fetch_error`]; the filesystem variants are
/// `FileNotFound` and `ReadError`.
///
/// # Example
///
/// ```rust
/// use verkehr_core::{VerkehrError, fetch_file};
///
/// match fetch_file("/does/not/exist.html") {
///     Ok(html) => println!("{} bytes", html.len()),
///     Err(VerkehrError::FileNotFound(path)) => println!("missing: {}", path.display()),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum VerkehrError {
    /// HTTP transport errors from reqwest.
    ///
    /// Connection refused, DNS failures, TLS problems and body decoding errors.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The server answered with a client or server error status.
    #[error("HTTP {status} returned for {url}")]
    HttpStatus { status: u16, url: String },

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a source looks like an http(s) URL but cannot be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// File not found.
    ///
    /// Returned when a local source path doesn't exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Any other I/O failure while reading a local source, including
    /// content that is not valid UTF-8.
    #[error("Failed to read file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Output serialization errors.
    #[error("Failed to serialize output: {0}")]
    SerializeError(String),
}

impl VerkehrError {
    /// Returns `true` for failures of the network branch of the loader.
    ///
    /// Pollers treat these as "temporarily unavailable".
    pub fn is_fetch_error(&self) -> bool {
        match self {
            #[cfg(feature = "fetch")]
            VerkehrError::HttpError(_) => true,
            VerkehrError::HttpStatus { .. } | VerkehrError::Timeout { .. } | VerkehrError::InvalidUrl(_) => true,
            VerkehrError::FileNotFound(_) | VerkehrError::ReadError(_) | VerkehrError::SerializeError(_) => false,
        }
    }
}

impl From<serde_json::Error> for VerkehrError {
    fn from(err: serde_json::Error) -> Self {
        VerkehrError::SerializeError(err.to_string())
    }
}

/// Result type alias for VerkehrError.
pub type Result<T> = std::result::Result<T, VerkehrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VerkehrError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_status_error() {
        let err = VerkehrError::HttpStatus { status: 404, url: "https://example.com/verkehr".to_string() };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("example.com"));
        assert!(err.is_fetch_error());
    }

    #[test]
    fn test_timeout_error() {
        let err = VerkehrError::Timeout { timeout: 20 };
        assert!(err.to_string().contains("20"));
        assert!(err.is_fetch_error());
    }

    #[test]
    fn test_file_errors_are_not_fetch_errors() {
        let err = VerkehrError::FileNotFound(PathBuf::from("/tmp/missing.html"));
        assert!(!err.is_fetch_error());

        let err = VerkehrError::from(std::io::Error::other("boom"));
        assert!(matches!(err, VerkehrError::ReadError(_)));
        assert!(!err.is_fetch_error());
    }
}
