//! DMN Runtime - Evaluation engine for compiled decisions
//!
//! This crate evaluates compiled decision tables against an input context
//! and produces typed decision results.

pub mod context;
pub mod engine;
pub mod error;
pub mod result;

// Re-export main types
pub use context::EvaluationContext;
pub use engine::{DecisionTableExecutor, DefaultExpressionEvaluator, ExpressionEvaluator};
pub use error::{EvalError, ExpressionError, Result, RuntimeError};
pub use result::{DecisionOutput, DecisionResult, OutputValue};
