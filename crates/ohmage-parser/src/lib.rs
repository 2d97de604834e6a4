//! Ohmage Parser - condition sentence lexer and parser
//!
//! This crate turns condition sentences such as
//! `[q1] >= 1 and [q2] == "yes"` into `ConditionNode` trees, and loads
//! survey definitions from YAML.
//!
//! Every call builds its own lexer and parser state, so parsing is safe
//! from any number of threads at once.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod survey_parser;
pub mod token;

// Re-export main parser types
pub use error::{LexError, ParseError, Result};
pub use lexer::{tokenize, Lexer};
pub use parser::{parse, ConditionParser, DEFAULT_MAX_DEPTH};
pub use survey_parser::SurveyParser;
pub use token::{Token, TokenKind};
