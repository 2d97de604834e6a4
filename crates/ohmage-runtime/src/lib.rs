//! Ohmage Runtime - read-only passes over parsed conditions
//!
//! - Grouping: per-identifier constraint lists for definition-time checks
//! - Evaluation: boolean verdict for a condition against collected responses
//!
//! Both passes borrow the tree immutably, so one parsed condition can be
//! grouped and evaluated from many threads at once.

mod comparison;
pub mod error;
pub mod evaluator;
pub mod grouping;
pub mod trace;

// Re-export main types
pub use error::{EvaluationError, Result};
pub use evaluator::{evaluate, Evaluator};
pub use grouping::{group, identifiers};
pub use trace::ConditionTrace;
