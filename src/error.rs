//! Error types for the rps-entropy crate

use thiserror::Error;

/// Main error type for the rps-entropy crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move '{input}' (expected one of R, P, S)")]
    InvalidMove { input: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid player kind '{input}'. Expected one of: {expected}")]
    ParsePlayerKind { input: String, expected: String },

    #[error("invalid policy kind '{input}'. Expected one of: {expected}")]
    ParsePolicyKind { input: String, expected: String },

    #[error("input stream closed before player '{player}' chose a move")]
    InputClosed { player: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    /// Shorthand for building an [`Error::InvalidConfiguration`].
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}
