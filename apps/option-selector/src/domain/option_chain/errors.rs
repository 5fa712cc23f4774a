//! Contract Selection Errors

use thiserror::Error;

/// Errors raised when a selection or filter call is malformed.
///
/// A well-formed call that finds nothing is not an error; it yields
/// [`Selection::NotFound`](super::Selection::NotFound).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// A call parameter is outside its valid range.
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Option right could not be parsed.
    #[error("Unknown option right: {value:?} (expected CALL or PUT)")]
    UnknownRight {
        /// The rejected input.
        value: String,
    },
}

impl SelectionError {
    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
