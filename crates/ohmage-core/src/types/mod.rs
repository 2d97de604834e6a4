//! Value types for condition evaluation

pub mod literal;

pub use literal::{Bindings, Literal};
