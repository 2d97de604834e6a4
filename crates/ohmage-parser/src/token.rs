//! Tokens produced by the lexer

use ohmage_core::{LogicalKind, OperatorKind};
use std::fmt;

/// Token kinds of the condition grammar
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `[prompt_id]`
    Identifier(String),
    /// Bare decimal number
    Number(f64),
    /// Double-quoted string
    String(String),
    Operator(OperatorKind),
    Logical(LogicalKind),
    LParen,
    RParen,
    EndOfInput,
}

/// A token with its byte offset in the source sentence
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, position: usize) -> Self {
        Self { kind, position }
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier(name) => write!(f, "identifier [{}]", name),
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::String(s) => write!(f, "string \"{}\"", s),
            TokenKind::Operator(op) => write!(f, "operator '{}'", op),
            TokenKind::Logical(kind) => write!(f, "keyword '{}'", kind),
            TokenKind::LParen => f.write_str("'('"),
            TokenKind::RParen => f.write_str("')'"),
            TokenKind::EndOfInput => f.write_str("end of input"),
        }
    }
}
