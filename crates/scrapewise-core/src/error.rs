//! Unified error types for scrapewise

use thiserror::Error;

/// Unified error type for all scrapewise operations
///
/// Collaborators convert these into fallback values at their origin
/// (see [`crate::fail_open`]), so an analysis run never surfaces one to the
/// process boundary.
#[derive(Error, Debug)]
pub enum ScrapewiseError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    // Permission file errors
    #[error("Permission check failed: {0}")]
    PermissionCheck(String),

    // Static fetch errors
    #[error("Static fetch failed: {0}")]
    StaticFetch(String),

    #[error("HTTP {status} returned for {url}")]
    HttpStatus { status: u16, url: String },

    // Rendered fetch errors
    #[error("Rendered fetch failed: {0}")]
    RenderedFetch(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias using ScrapewiseError
pub type Result<T> = std::result::Result<T, ScrapewiseError>;
