//! Abstract Syntax Tree (AST) definitions for DMN
//!
//! This module contains the AST node definitions for:
//! - Decision models and their raw decision logic
//! - Expressions
//! - Unary tests (input entries)
//! - Hit policies

pub mod expression;
pub mod hit_policy;
pub mod model;
pub mod operator;

pub use expression::{Expression, UnaryOperator};
pub use hit_policy::{BuiltinAggregator, HitPolicy};
pub use model::{
    DecisionDefinition, DecisionLogic, DecisionModel, LogicKind, RawDecisionTable,
    RawInputClause, RawOutputClause, RawRule,
};
pub use operator::Operator;
pub use unary_test::{UnaryTest, UnaryTests};
