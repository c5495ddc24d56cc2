//! Decision handle

use crate::error::Result;
use dmn_core::ast::{HitPolicy, LogicKind};
use dmn_core::ir::{CompiledDecision, CompiledLogic};
use dmn_core::Value;
use dmn_runtime::{DecisionResult, DecisionTableExecutor, EvaluationContext};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A compiled decision ready for evaluation.
///
/// Cheap to clone and safe to evaluate from many threads at once.
#[derive(Clone)]
pub struct Decision {
    compiled: Arc<CompiledDecision>,
    executor: DecisionTableExecutor,
}

impl Decision {
    pub(crate) fn new(compiled: CompiledDecision, executor: DecisionTableExecutor) -> Self {
        Self {
            compiled: Arc::new(compiled),
            executor,
        }
    }

    pub fn id(&self) -> &str {
        self.compiled.id()
    }

    pub fn name(&self) -> Option<&str> {
        self.compiled.metadata.name.as_deref()
    }

    /// Label of the model source the decision was compiled from
    pub fn source_label(&self) -> &str {
        &self.compiled.metadata.source_label
    }

    pub fn logic_kind(&self) -> LogicKind {
        self.compiled.metadata.logic_kind
    }

    pub fn hit_policy(&self) -> HitPolicy {
        match &self.compiled.logic {
            CompiledLogic::DecisionTable(table) => table.hit_policy,
        }
    }

    /// Display names of the input columns
    pub fn input_names(&self) -> Vec<&str> {
        match &self.compiled.logic {
            CompiledLogic::DecisionTable(table) => {
                table.inputs.iter().map(|input| input.display_name()).collect()
            }
        }
    }

    pub fn output_names(&self) -> Vec<&str> {
        match &self.compiled.logic {
            CompiledLogic::DecisionTable(table) => table.output_names(),
        }
    }

    /// The compiled form of the decision
    pub fn compiled(&self) -> &CompiledDecision {
        &self.compiled
    }

    /// Evaluate the decision against a context
    pub fn evaluate(&self, context: &EvaluationContext) -> Result<DecisionResult> {
        Ok(self.executor.execute(&self.compiled, context)?)
    }

    /// Evaluate the decision against a map of variables
    pub fn evaluate_variables(&self, variables: HashMap<String, Value>) -> Result<DecisionResult> {
        self.evaluate(&EvaluationContext::from(variables))
    }
}

impl fmt::Debug for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decision")
            .field("id", &self.id())
            .field("source_label", &self.source_label())
            .field("hit_policy", &self.hit_policy())
            .finish()
    }
}
