//! Literal values for condition sentences
//!
//! A `Literal` is either numeric or text. Its kind is fixed by its lexical
//! form: bare digits are numeric, double-quoted values are text. A quoted
//! numeral such as `"5"` stays text and is never coerced.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Literal value in a comparison, or a bound response value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// Numeric value (IEEE-754 double)
    Numeric(f64),
    /// Text value
    Text(String),
}

/// Runtime map of prompt identifier to collected response value
pub type Bindings = HashMap<String, Literal>;

impl Literal {
    /// Create a numeric literal
    pub fn numeric(value: f64) -> Self {
        Literal::Numeric(value)
    }

    /// Create a text literal
    pub fn text(value: impl Into<String>) -> Self {
        Literal::Text(value.into())
    }

    /// Name of the literal kind, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Literal::Numeric(_) => "numeric",
            Literal::Text(_) => "text",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Literal::Numeric(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Literal::Text(_))
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Numeric(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Numeric(value as f64)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Text(value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Numeric(n) => write!(f, "{}", n),
            Literal::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}
