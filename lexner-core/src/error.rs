//! Error types for lexner-core.

use thiserror::Error;

/// Result type for lexner-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for lexner-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A span with `start >= end`.
    #[error("Invalid span: start {start} must be less than end {end}")]
    InvalidSpan {
        /// Start offset as given.
        start: usize,
        /// End offset as given.
        end: usize,
    },

    /// Two records in one entity set claim overlapping text.
    #[error("Overlapping entities: {0}")]
    Overlap(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create an overlap error.
    #[must_use]
    pub fn overlap(msg: impl Into<String>) -> Self {
        Self::Overlap(msg.into())
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
