//! Evaluation result types

mod result;

pub use result::{DecisionOutput, DecisionResult, OutputValue};
