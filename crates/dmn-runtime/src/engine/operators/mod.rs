//! Operator execution modules
//!
//! Operator semantics shared by the expression evaluator and unary tests.

mod binary;
mod comparison;
mod unary;

pub(crate) use binary::execute_binary_op;
pub(crate) use comparison::execute_compare;
pub(crate) use unary::execute_unary_op;
