//! Error types for the Bookfinder plugin.
//!
//! This module defines the centralized error type [`BookfinderError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Catalog and image failures are recovered at the screen that issued the request;
//! none of them reach the navigation shell.

use thiserror::Error;

/// Message shown on the search screen when a catalog request fails.
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to fetch books. Please try again.";

/// The main error type for Bookfinder plugin operations.
#[derive(Debug, Error)]
pub enum BookfinderError {
    /// The catalog answered with a non-success HTTP status.
    #[error("API Error: {status} {status_text}")]
    Remote {
        /// HTTP status code returned by the catalog.
        status: u16,
        /// Canonical reason phrase for `status`.
        status_text: String,
    },

    /// The request never produced a usable response.
    ///
    /// Covers host-side request failures as well as bodies that are not a
    /// valid catalog response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A cover image could not be fetched or decoded.
    #[error("Image load error: {0}")]
    ImageLoad(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Bookfinder operations.
pub type Result<T> = std::result::Result<T, BookfinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_displays_status_and_text() {
        let err = BookfinderError::Remote {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "API Error: 500 Internal Server Error");
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn read() -> Result<String> {
            Ok(std::fs::read_to_string("/nonexistent/bookfinder/theme.toml")?)
        }
        assert!(matches!(read(), Err(BookfinderError::Io(_))));
    }
}
