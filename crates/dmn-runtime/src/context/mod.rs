//! Evaluation context module
//!
//! Holds the variable bindings a decision is evaluated against.

mod context;
mod field_lookup;

// Re-export public types
pub use context::EvaluationContext;
