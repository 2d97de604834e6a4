//! Comparison of a bound response value against a condition literal

use crate::error::{EvaluationError, Result};
use ohmage_core::{Literal, OperatorKind};

/// Compare `actual` (the response) with `expected` (the literal) using `op`
///
/// Numbers compare with IEEE-754 semantics, so any comparison involving NaN
/// is false except `!=`. Text supports only `==` and `!=`.
pub(crate) fn compare(
    identifier: &str,
    actual: &Literal,
    op: OperatorKind,
    expected: &Literal,
) -> Result<bool> {
    match (actual, expected) {
        (Literal::Numeric(l), Literal::Numeric(r)) => Ok(match op {
            OperatorKind::Eq => l == r,
            OperatorKind::Ne => l != r,
            OperatorKind::Lt => l < r,
            OperatorKind::Le => l <= r,
            OperatorKind::Gt => l > r,
            OperatorKind::Ge => l >= r,
        }),

        (Literal::Text(l), Literal::Text(r)) => match op {
            OperatorKind::Eq => Ok(l == r),
            OperatorKind::Ne => Ok(l != r),
            _ => Err(EvaluationError::UnsupportedComparison {
                identifier: identifier.to_string(),
                operator: op,
            }),
        },

        _ => Err(EvaluationError::TypeMismatch {
            identifier: identifier.to_string(),
            expected: expected.kind_name().to_string(),
            actual: actual.kind_name().to_string(),
        }),
    }
}
