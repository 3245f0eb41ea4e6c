//! Error types for the Popcorn plugin.
//!
//! This module defines the crate-wide error type [`PopcornError`] and the
//! [`Result`] alias used by storage, worker, and configuration code. Failures
//! of the two movie lookups are modelled separately by [`FetchError`], whose
//! `Display` text is exactly what the user sees in place of the result list or
//! the details pane.

use thiserror::Error;

/// The main error type for Popcorn plugin operations.
///
/// # Examples
///
/// ```
/// use popcorn::domain::PopcornError;
///
/// fn read_watchlist() -> Result<(), PopcornError> {
///     Err(PopcornError::Storage("watchlist file is locked".to_string()))
/// }
///
/// assert!(read_watchlist().is_err());
/// ```
#[derive(Debug, Error)]
pub enum PopcornError {
    /// Reading from or writing to the key-value store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized or deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Popcorn operations.
pub type Result<T> = std::result::Result<T, PopcornError>;

/// Why a movie lookup produced no usable data.
///
/// Cancellation is deliberately absent: a cancelled request is dropped before
/// it reaches the point where a `FetchError` could be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The endpoint could not be reached or answered with a non-success status.
    #[error("Connection Lost...")]
    Transport,

    /// The endpoint answered but reported that nothing matched.
    #[error("Movies not found!")]
    NoResults,

    /// The endpoint answered with a body that is not the expected JSON shape.
    #[error("Unexpected response from movie database")]
    Malformed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_render_user_facing_messages() {
        assert_eq!(FetchError::Transport.to_string(), "Connection Lost...");
        assert_eq!(FetchError::NoResults.to_string(), "Movies not found!");
    }

    #[test]
    fn io_errors_convert_into_popcorn_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PopcornError = io.into();
        assert!(err.to_string().starts_with("IO error"));
    }
}
