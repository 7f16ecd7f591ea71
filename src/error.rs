//! Error types for lexner.

use thiserror::Error;

/// Result type for lexner operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for lexner operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A regex category pattern failed to compile.
    ///
    /// Raised by `populate`; the store is left exactly as it was.
    #[error("Invalid regex for category '{category}': {message}")]
    InvalidPattern {
        /// Category whose pattern was rejected.
        category: String,
        /// Compiler message.
        message: String,
    },

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Request or config decoding failed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the core types.
    #[error(transparent)]
    Core(#[from] lexner_core::Error),
}

impl Error {
    /// Create an invalid pattern error.
    pub fn invalid_pattern(category: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidPattern {
            category: category.into(),
            message: message.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// True for [`Error::InvalidPattern`].
    #[must_use]
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, Error::InvalidPattern { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(format!("{}", err))
    }
}
