//! Condition sentence lexer
//!
//! Recognizes:
//! - Bracketed identifiers: `[prompt_id]`
//! - Numbers: `5`, `-1`, `+2.5`, `.5`
//! - Double-quoted strings: `"yes"` (no escapes)
//! - Operators: `==`, `!=`, `<`, `<=`, `>`, `>=`
//! - Case-insensitive keywords: `and`, `or`
//! - Parentheses
//!
//! Whitespace is skipped. The token stream is lazy and always finishes with
//! `EndOfInput`, or stops after the first error.

use crate::error::LexError;
use crate::token::{Token, TokenKind};
use ohmage_core::{LogicalKind, OperatorKind};
use std::iter::Peekable;
use std::str::CharIndices;

/// Tokenize a condition sentence
///
/// Every call returns an independent lexer; nothing is shared between calls.
pub fn tokenize(input: &str) -> Lexer<'_> {
    Lexer::new(input)
}

/// Lazy tokenizer over a single condition sentence
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            finished: false,
        }
    }

    /// Produce the next token; returns `EndOfInput` repeatedly once exhausted
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let Some(&(start, ch)) = self.chars.peek() else {
            return Ok(Token::new(TokenKind::EndOfInput, self.input.len()));
        };

        match ch {
            '(' => {
                self.chars.next();
                Ok(Token::new(TokenKind::LParen, start))
            }
            ')' => {
                self.chars.next();
                Ok(Token::new(TokenKind::RParen, start))
            }
            '[' => self.read_identifier(start),
            '"' => self.read_string(start),
            '=' | '!' | '<' | '>' => self.read_operator(start, ch),
            '+' | '-' | '.' | '0'..='9' => self.read_number(start),
            c if c.is_alphabetic() => self.read_keyword(start),
            c => Err(LexError::new(
                start,
                format!("Unrecognized character '{}'", c),
            )),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    /// Byte offset of the next unread character
    fn offset(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(i, _)| *i)
            .unwrap_or(self.input.len())
    }

    fn read_identifier(&mut self, start: usize) -> Result<Token, LexError> {
        self.chars.next(); // '['
        let body_start = self.offset();

        loop {
            match self.chars.next() {
                Some((end, ']')) => {
                    let name = self.input[body_start..end].trim();
                    if name.is_empty() {
                        return Err(LexError::new(start, "Empty identifier"));
                    }
                    return Ok(Token::new(TokenKind::Identifier(name.to_string()), start));
                }
                Some(_) => {}
                None => return Err(LexError::new(start, "Unterminated identifier")),
            }
        }
    }

    fn read_string(&mut self, start: usize) -> Result<Token, LexError> {
        self.chars.next(); // opening quote
        let body_start = self.offset();

        loop {
            match self.chars.next() {
                Some((end, '"')) => {
                    let value = self.input[body_start..end].to_string();
                    return Ok(Token::new(TokenKind::String(value), start));
                }
                Some(_) => {}
                None => return Err(LexError::new(start, "Unterminated string")),
            }
        }
    }

    fn read_operator(&mut self, start: usize, first: char) -> Result<Token, LexError> {
        self.chars.next();
        let has_equals = self.chars.next_if(|(_, c)| *c == '=').is_some();

        let op = match (first, has_equals) {
            ('=', true) => OperatorKind::Eq,
            ('!', true) => OperatorKind::Ne,
            ('<', true) => OperatorKind::Le,
            ('<', false) => OperatorKind::Lt,
            ('>', true) => OperatorKind::Ge,
            ('>', false) => OperatorKind::Gt,
            (c, _) => {
                return Err(LexError::new(
                    start,
                    format!("Unrecognized operator '{}', expected '{}='", c, c),
                ))
            }
        };

        Ok(Token::new(TokenKind::Operator(op), start))
    }

    fn read_number(&mut self, start: usize) -> Result<Token, LexError> {
        self.chars.next_if(|(_, c)| *c == '+' || *c == '-');

        let mut digits = 0;
        while self.chars.next_if(|(_, c)| c.is_ascii_digit()).is_some() {
            digits += 1;
        }
        if self.chars.next_if(|(_, c)| *c == '.').is_some() {
            while self.chars.next_if(|(_, c)| c.is_ascii_digit()).is_some() {
                digits += 1;
            }
        }

        let end = self.offset();
        let text = &self.input[start..end];
        if digits == 0 {
            return Err(LexError::new(
                start,
                format!("Unrecognized character '{}'", text),
            ));
        }

        let value = text
            .parse::<f64>()
            .map_err(|_| LexError::new(start, format!("Invalid number '{}'", text)))?;
        if !value.is_finite() {
            return Err(LexError::new(
                start,
                format!("Number out of range '{}'", text),
            ));
        }

        Ok(Token::new(TokenKind::Number(value), start))
    }

    fn read_keyword(&mut self, start: usize) -> Result<Token, LexError> {
        while self
            .chars
            .next_if(|(_, c)| c.is_alphanumeric() || *c == '_')
            .is_some()
        {}

        let end = self.offset();
        let word = &self.input[start..end];
        match word.to_ascii_lowercase().as_str() {
            "and" => Ok(Token::new(TokenKind::Logical(LogicalKind::And), start)),
            "or" => Ok(Token::new(TokenKind::Logical(LogicalKind::Or), start)),
            _ => Err(LexError::new(
                start,
                format!(
                    "Unexpected word '{}'; identifiers are written as [{}]",
                    word, word
                ),
            )),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        match &result {
            Ok(token) if token.is_end() => self.finished = true,
            Err(_) => self.finished = true,
            Ok(_) => {}
        }
        Some(result)
    }
}
