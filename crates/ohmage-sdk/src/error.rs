//! SDK error types

use ohmage_parser::ParseError;
use ohmage_runtime::EvaluationError;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A condition sentence failed to parse
    #[error("Condition parse failed for Condition Sentence: {sentence}: {source}")]
    InvalidCondition {
        sentence: String,
        #[source]
        source: ParseError,
    },

    /// A condition references a prompt that is not declared
    #[error("Unknown prompt '{identifier}' in Condition Sentence: {sentence}")]
    UnknownPrompt { identifier: String, sentence: String },

    /// A condition references its own item or a later one
    #[error("Condition on item '{item}' references '{identifier}', which is not an earlier item")]
    ForwardReference { item: String, identifier: String },

    /// Survey document error
    #[error("Parser error: {0}")]
    ParseError(#[from] ParseError),

    /// Evaluation error
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SdkError {
    /// Byte offset of a condition syntax error, if any
    pub fn position(&self) -> Option<usize> {
        match self {
            SdkError::InvalidCondition { source, .. } => source.position(),
            _ => None,
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
