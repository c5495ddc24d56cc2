//! Intermediate Representation (IR) for DMN
//!
//! The IR is the validated, executable form of a decision. It serves as the
//! target of compilation from the model AST and owns everything needed for
//! evaluation, so the model it came from may be dropped after compilation.

pub mod decision_table;
pub mod program;

pub use decision_table::{
    CompiledExpression, DecisionTableProgram, InputColumn, InputEntry, OutputColumn, TableRule,
};
pub use program::{CompiledDecision, CompiledLogic, DecisionMetadata};
