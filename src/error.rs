//! Centralized error handling for markpad
//!
//! This module provides a unified error type covering the widget's failure
//! scenarios: options parsing and rejected fullscreen requests. Most other
//! runtime failure modes deliberately degrade to "state did not change"
//! instead of raising an error (undefined host inputs in particular), so the
//! surface here is small.

use log::warn;
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Custom Result Type Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for the widget.
pub type Result<T> = std::result::Result<T, Error>;

/// The centralized error type for the widget.
#[derive(Debug)]
pub enum Error {
    /// Failed to parse editor options (invalid JSON/format)
    OptionsParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The platform refused a fullscreen transition request
    FullscreenRejected,
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::OptionsParse {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OptionsParse { message, .. } => {
                write!(f, "Invalid editor options: {}", message)
            }
            Error::FullscreenRejected => {
                write!(f, "Fullscreen request rejected by the platform")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::OptionsParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            Error::FullscreenRejected => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for Result to support graceful degradation.
pub trait ResultExt<T> {
    /// If the result is an error, log it at warning level and return the provided default.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("{}: {}. Using default.", context, err);
                default
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
