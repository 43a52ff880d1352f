//! Error types for flowlab

use thiserror::Error;

/// flowlab error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Validation error (bad construction input or configuration)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// A point-to-parameter solve has no determinate answer.
    ///
    /// Callers are expected to keep their previous parameter value.
    #[error("Indeterminate: {0}")]
    Indeterminate(String),
}

impl Error {
    /// Whether this is the [`Error::Indeterminate`] signal.
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Error::Indeterminate(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
