//! Execution engine module
//!
//! Provides the expression evaluator and the decision table executor.

mod decision_table_executor;
mod expression_evaluator;
mod functions;
mod hit_policy;
mod operators;

#[cfg(test)]
mod tests;

// Re-export for convenience
pub use decision_table_executor::DecisionTableExecutor;
pub use expression_evaluator::{DefaultExpressionEvaluator, ExpressionEvaluator};
