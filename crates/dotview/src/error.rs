//! Error types for dotview operations.
//!
//! Failures inside a page (no source, a broken render) never surface here:
//! they become a [`ViewState::Error`](dotview_core::ViewState::Error). This
//! type covers what happens around a page, such as reading configuration or
//! parsing the location.

use std::io;

use thiserror::Error;

/// The main error type for dotview operations.
#[derive(Debug, Error)]
pub enum DotviewError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid location `{location}`: {source}")]
    Location {
        location: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    View(String),
}

impl DotviewError {
    /// Create a new `Location` error for the given input.
    pub fn new_location_error(location: impl Into<String>, source: url::ParseError) -> Self {
        Self::Location {
            location: location.into(),
            source,
        }
    }
}
