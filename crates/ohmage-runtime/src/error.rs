//! Evaluation error types

use ohmage_core::OperatorKind;
use thiserror::Error;

/// Evaluation error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// The condition references a prompt with no collected response
    #[error("Missing binding for identifier: {0}")]
    MissingBinding(String),

    /// Bound value and literal are of different kinds
    #[error("Type mismatch for '{identifier}': condition expects a {expected} value, got {actual}")]
    TypeMismatch {
        identifier: String,
        expected: String,
        actual: String,
    },

    /// Ordering operator applied to text
    #[error("Unsupported comparison for '{identifier}': operator '{operator}' cannot compare text")]
    UnsupportedComparison {
        identifier: String,
        operator: OperatorKind,
    },
}

/// Result type for evaluation
pub type Result<T> = std::result::Result<T, EvaluationError>;
