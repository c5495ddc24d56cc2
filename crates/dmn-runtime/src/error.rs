//! Runtime error types

use dmn_core::ast::HitPolicy;
use dmn_core::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Failure while evaluating a single expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Variable not present in the context
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    /// Operand of the wrong type
    #[error("Type error: {0}")]
    TypeError(String),

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Function not known to the evaluator
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Wrong number or type of function arguments
    #[error("Invalid arguments for {function}: {message}")]
    InvalidArguments { function: String, message: String },
}

/// Expression failure reported by an expression evaluator.
///
/// Carries the offending expression text and a snapshot of the context
/// variables, ordered by name.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Failed to evaluate expression '{expression}': {cause}")]
pub struct ExpressionError {
    pub expression: String,
    #[source]
    pub cause: EvalError,
    pub context: BTreeMap<String, Value>,
}

/// Runtime error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Hit policy requiring a unique or agreeing match was violated
    #[error("Rule conflict in decision '{decision_id}' with hit policy {hit_policy}: {message}")]
    RuleConflict {
        decision_id: String,
        hit_policy: HitPolicy,
        rule_ids: Vec<String>,
        message: String,
    },

    /// Expression evaluation failed
    #[error("Expression error at {location} in decision '{decision_id}': {source}")]
    Expression {
        decision_id: String,
        location: String,
        #[source]
        source: ExpressionError,
    },

    /// Value does not match the declared type or aggregation
    #[error("Type error at {location} in decision '{decision_id}': {message}")]
    TypeError {
        decision_id: String,
        location: String,
        message: String,
    },

    /// A single output was requested from a result with several
    #[error("Decision result is not unique: it contains {0} outputs")]
    NotUnique(usize),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
