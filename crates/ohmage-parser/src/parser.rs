//! Condition sentence parser
//!
//! Recursive descent over the lexer's token stream. AND binds tighter than
//! OR and both associate to the left:
//!
//! ```text
//! sentence   := orExpr EndOfInput
//! orExpr     := andExpr ( OR andExpr )*
//! andExpr    := term ( AND term )*
//! term       := comparison | LParen orExpr RParen
//! comparison := Identifier Operator literal
//! literal    := Number | String
//! ```
//!
//! `ConditionParser` only holds configuration. Each `parse` call creates a
//! fresh `ParseState` (lexer, lookahead token, nesting counter) that lives
//! for that call alone.

use crate::error::{ParseError, Result};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use ohmage_core::{ConditionNode, Literal, LogicalKind};

/// Default limit for tree depth and parenthesis nesting
///
/// Tree depth grows with every `and`/`or` in a chain, since chains are built
/// as left-nested binary nodes: `[a]==1 or [a]==2 or [a]==3` has depth 3.
/// A flat list of more than 128 alternatives therefore fails with
/// `DepthExceeded` at the default; raise the limit with
/// `ConditionParser::with_max_depth` (or `EngineConfig::max_depth`) for
/// long option lists.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Parse a condition sentence with the default depth limit
pub fn parse(input: &str) -> Result<ConditionNode> {
    ConditionParser::new().parse(input)
}

/// Condition parser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionParser {
    max_depth: usize,
}

impl Default for ConditionParser {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ConditionParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit both the tree depth and the parenthesis nesting (minimum 1)
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parse a condition sentence into a tree
    pub fn parse(&self, input: &str) -> Result<ConditionNode> {
        let (node, depth) = ParseState::new(input, self.max_depth)?.sentence()?;
        log::debug!(
            "Parsed condition '{}' ({} comparisons, depth {})",
            input,
            node.comparison_count(),
            depth
        );
        Ok(node)
    }
}

/// A parsed subtree together with its depth
type Subtree = (ConditionNode, usize);

/// Per-call parser state
struct ParseState<'a> {
    lexer: Lexer<'a>,
    current: Token,
    max_depth: usize,
    nesting: usize,
}

impl<'a> ParseState<'a> {
    fn new(input: &'a str, max_depth: usize) -> Result<Self> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            max_depth,
            nesting: 0,
        })
    }

    /// Consume the current token and return it
    fn advance(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn sentence(mut self) -> Result<Subtree> {
        if self.current.is_end() {
            return Err(ParseError::syntax(
                self.current.position,
                "Empty condition sentence",
            ));
        }

        let tree = self.or_expr()?;

        match &self.current.kind {
            TokenKind::EndOfInput => Ok(tree),
            TokenKind::RParen => Err(ParseError::UnmatchedParen {
                position: self.current.position,
                paren: ')',
            }),
            other => Err(ParseError::syntax(
                self.current.position,
                format!("Unexpected {} after complete condition", other),
            )),
        }
    }

    fn or_expr(&mut self) -> Result<Subtree> {
        let mut left = self.and_expr()?;
        while self.current.kind == TokenKind::Logical(LogicalKind::Or) {
            let keyword = self.advance()?;
            let right = self.and_expr()?;
            left = self.join(LogicalKind::Or, left, right, keyword.position)?;
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<Subtree> {
        let mut left = self.term()?;
        while self.current.kind == TokenKind::Logical(LogicalKind::And) {
            let keyword = self.advance()?;
            let right = self.term()?;
            left = self.join(LogicalKind::And, left, right, keyword.position)?;
        }
        Ok(left)
    }

    fn join(
        &self,
        kind: LogicalKind,
        (left, left_depth): Subtree,
        (right, right_depth): Subtree,
        position: usize,
    ) -> Result<Subtree> {
        let depth = 1 + left_depth.max(right_depth);
        if depth > self.max_depth {
            return Err(ParseError::DepthExceeded {
                position,
                max_depth: self.max_depth,
            });
        }
        Ok((ConditionNode::logical(kind, left, right), depth))
    }

    fn term(&mut self) -> Result<Subtree> {
        let position = self.current.position;

        match &self.current.kind {
            TokenKind::LParen => {
                self.advance()?;
                self.group(position)
            }
            TokenKind::Identifier(name) => {
                let identifier = name.clone();
                self.advance()?;
                self.comparison(identifier)
            }
            TokenKind::EndOfInput => Err(ParseError::UnexpectedEnd {
                position,
                expected: "a comparison".to_string(),
            }),
            TokenKind::Operator(op) => Err(ParseError::syntax(
                position,
                format!("Operator '{}' has no left-hand identifier", op),
            )),
            TokenKind::Number(_) | TokenKind::String(_) => Err(ParseError::syntax(
                position,
                format!(
                    "Expected an identifier such as [prompt_id], found {}",
                    self.current.kind
                ),
            )),
            other => Err(ParseError::syntax(
                position,
                format!("Expected a comparison, found {}", other),
            )),
        }
    }

    fn group(&mut self, open_position: usize) -> Result<Subtree> {
        self.nesting += 1;
        if self.nesting > self.max_depth {
            return Err(ParseError::DepthExceeded {
                position: open_position,
                max_depth: self.max_depth,
            });
        }

        let inner = self.or_expr()?;

        match &self.current.kind {
            TokenKind::RParen => {
                self.advance()?;
                self.nesting -= 1;
                Ok(inner)
            }
            TokenKind::EndOfInput => Err(ParseError::UnmatchedParen {
                position: open_position,
                paren: '(',
            }),
            other => Err(ParseError::syntax(
                self.current.position,
                format!(
                    "Expected ')' to close '(' at offset {}, found {}",
                    open_position, other
                ),
            )),
        }
    }

    fn comparison(&mut self, identifier: String) -> Result<Subtree> {
        let position = self.current.position;
        let operator = match &self.current.kind {
            TokenKind::Operator(op) => *op,
            TokenKind::EndOfInput => {
                return Err(ParseError::UnexpectedEnd {
                    position,
                    expected: format!("a comparison operator after [{}]", identifier),
                })
            }
            other => {
                return Err(ParseError::syntax(
                    position,
                    format!(
                        "Expected a comparison operator after [{}], found {}",
                        identifier, other
                    ),
                ))
            }
        };
        self.advance()?;

        let position = self.current.position;
        let literal = match &self.current.kind {
            TokenKind::Number(n) => Literal::Numeric(*n),
            TokenKind::String(s) => Literal::Text(s.clone()),
            TokenKind::EndOfInput => {
                return Err(ParseError::UnexpectedEnd {
                    position,
                    expected: format!("a number or quoted string after '{}'", operator),
                })
            }
            TokenKind::Identifier(name) => {
                return Err(ParseError::syntax(
                    position,
                    format!(
                        "Expected a literal after '{}', found identifier [{}]; \
                         prompts can only be compared with literals",
                        operator, name
                    ),
                ))
            }
            other => {
                return Err(ParseError::syntax(
                    position,
                    format!(
                        "Expected a number or quoted string after '{}', found {}",
                        operator, other
                    ),
                ))
            }
        };
        self.advance()?;

        Ok((
            ConditionNode::Comparison {
                identifier,
                operator,
                literal,
            },
            1,
        ))
    }
}
