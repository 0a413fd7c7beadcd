use std::error::Error as StdError;

use thiserror::Error;

/// Convenience result type for cleaning operations.
pub type CleanResult<T> = Result<T, CleanError>;

/// Error type returned by the cleaning engine and its helpers.
///
/// The default handlers never fail: the only runtime errors come from caller-supplied
/// handlers ([`CleanError::Handler`]) or from parsing text input in [`crate::json`].
#[derive(Debug, Error)]
pub enum CleanError {
    /// Invalid engine or execution configuration (e.g. an override for an unknown category).
    ///
    /// Always raised while building, never while processing.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A caller-supplied handler failed.
    ///
    /// The engine never wraps or recovers these; they surface exactly as the handler built them.
    #[error("handler error: {message}")]
    Handler {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Text input handed to the JSON helpers could not be used (empty input, bad NDJSON line).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Underlying JSON parse error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CleanError {
    /// Build a [`CleanError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Build a [`CleanError::Handler`] without an underlying cause.
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler {
            message: message.into(),
            source: None,
        }
    }

    /// Build a [`CleanError::Handler`] that keeps `source` in the error chain.
    pub fn handler_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::Handler {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns `true` for build-time configuration failures.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
