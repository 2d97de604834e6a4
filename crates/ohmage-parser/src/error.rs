//! Parser error types

use thiserror::Error;

/// Lexical error: unrecognized character or unterminated literal
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} at offset {position}")]
pub struct LexError {
    /// Byte offset into the condition sentence
    pub position: usize,
    pub message: String,
}

impl LexError {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// Parser error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Tokenization failed
    #[error("Lexical error: {0}")]
    Lex(#[from] LexError),

    /// Grammar violation
    #[error("Syntax error at offset {position}: {message}")]
    Syntax { position: usize, message: String },

    /// Input ended before the sentence was complete
    #[error("Unexpected end of input at offset {position}: expected {expected}")]
    UnexpectedEnd { position: usize, expected: String },

    /// A parenthesis without its partner
    #[error("Unmatched '{paren}' at offset {position}")]
    UnmatchedParen { position: usize, paren: char },

    /// Nesting deeper than the configured maximum
    #[error("Nesting depth exceeds maximum of {max_depth} at offset {position}")]
    DepthExceeded { position: usize, max_depth: usize },

    /// Invalid survey definition document
    ///
    /// Holds the rendered `serde_yaml::Error` message (including its line and
    /// column) rather than the error itself, which is neither `Clone` nor
    /// `PartialEq`; `ParseError` keeps both derives so callers can compare
    /// and clone parse errors.
    #[error("YAML parsing error: {0}")]
    Yaml(String),

    /// Survey definition failed structural checks
    #[error("Invalid survey definition: {0}")]
    InvalidSurvey(String),
}

impl From<serde_yaml::Error> for ParseError {
    fn from(error: serde_yaml::Error) -> Self {
        ParseError::Yaml(error.to_string())
    }
}

impl ParseError {
    pub(crate) fn syntax(position: usize, message: impl Into<String>) -> Self {
        ParseError::Syntax {
            position,
            message: message.into(),
        }
    }

    /// Byte offset of the error in the condition sentence, if it has one
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::Lex(e) => Some(e.position),
            ParseError::Syntax { position, .. }
            | ParseError::UnexpectedEnd { position, .. }
            | ParseError::UnmatchedParen { position, .. }
            | ParseError::DepthExceeded { position, .. } => Some(*position),
            ParseError::Yaml(_) | ParseError::InvalidSurvey(_) => None,
        }
    }
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
