//! Code generation module
//!
//! This module contains code generators that transform raw decision logic
//! into executable IR.

pub mod decision_table_codegen;
pub mod expression_codegen;

pub use decision_table_codegen::DecisionTableCompiler;
pub use expression_codegen::ExpressionCompiler;
