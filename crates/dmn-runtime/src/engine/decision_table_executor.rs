//! Decision table executor
//!
//! Evaluates a compiled decision table against a context:
//! 1. each input expression is evaluated once and coerced to its column type
//! 2. rules are matched in declaration order, a rule matching when all its
//!    input entries accept the column subjects
//! 3. output entries of the retained rules are evaluated and coerced
//! 4. the hit policy reduces them to the entries of the result

use crate::context::EvaluationContext;
use crate::engine::expression_evaluator::{DefaultExpressionEvaluator, ExpressionEvaluator};
use crate::engine::hit_policy;
use crate::error::{Result, RuntimeError};
use crate::result::{DecisionOutput, DecisionResult, OutputValue};
use dmn_core::ir::{CompiledDecision, CompiledLogic, DecisionTableProgram, TableRule};
use dmn_core::Value;
use std::fmt;
use std::sync::Arc;

/// Executor for compiled decisions
#[derive(Clone)]
pub struct DecisionTableExecutor {
    evaluator: Arc<dyn ExpressionEvaluator>,
}

impl DecisionTableExecutor {
    /// Create an executor using the built-in expression language
    pub fn new() -> Self {
        Self::with_evaluator(Arc::new(DefaultExpressionEvaluator::new()))
    }

    /// Create an executor with a custom expression evaluator
    pub fn with_evaluator(evaluator: Arc<dyn ExpressionEvaluator>) -> Self {
        Self { evaluator }
    }

    /// Evaluate a compiled decision
    pub fn execute(
        &self,
        decision: &CompiledDecision,
        context: &EvaluationContext,
    ) -> Result<DecisionResult> {
        match &decision.logic {
            CompiledLogic::DecisionTable(table) => self.execute_table(decision.id(), table, context),
        }
    }

    /// Evaluate a decision table
    pub fn execute_table(
        &self,
        decision_id: &str,
        table: &DecisionTableProgram,
        context: &EvaluationContext,
    ) -> Result<DecisionResult> {
        let subjects = self.evaluate_subjects(decision_id, table, context)?;

        let mut matched: Vec<&TableRule> = Vec::new();
        for rule in &table.rules {
            if self.rule_matches(decision_id, table, rule, &subjects, context)? {
                matched.push(rule);
                if hit_policy::takes_first_only(table.hit_policy) {
                    break;
                }
            }
        }

        let matched_ids: Vec<&str> = matched.iter().map(|rule| rule.id.as_str()).collect();
        tracing::debug!(
            "Decision '{}': {} of {} rules matched [{}]",
            decision_id,
            matched.len(),
            table.rule_count(),
            matched_ids.join(", ")
        );

        hit_policy::check_unique(decision_id, table, &matched_ids)?;

        let entries = matched
            .into_iter()
            .map(|rule| self.evaluate_outputs(decision_id, table, rule, context))
            .collect::<Result<Vec<_>>>()?;

        let outputs = hit_policy::apply(decision_id, table, entries)?;

        tracing::debug!(
            "Decision '{}' produced {} output entries with hit policy {}",
            decision_id,
            outputs.len(),
            table.hit_policy
        );

        Ok(DecisionResult::new(decision_id, outputs))
    }

    fn evaluate_subjects(
        &self,
        decision_id: &str,
        table: &DecisionTableProgram,
        context: &EvaluationContext,
    ) -> Result<Vec<Value>> {
        table
            .inputs
            .iter()
            .map(|column| {
                let location = format!("input '{}'", column.display_name());
                let value = self
                    .evaluator
                    .evaluate(&column.expression, context)
                    .map_err(|source| RuntimeError::Expression {
                        decision_id: decision_id.to_string(),
                        location: location.clone(),
                        source,
                    })?;

                column
                    .type_ref
                    .coerce(value)
                    .map_err(|e| RuntimeError::TypeError {
                        decision_id: decision_id.to_string(),
                        location,
                        message: e.to_string(),
                    })
            })
            .collect()
    }

    fn rule_matches(
        &self,
        decision_id: &str,
        table: &DecisionTableProgram,
        rule: &TableRule,
        subjects: &[Value],
        context: &EvaluationContext,
    ) -> Result<bool> {
        for ((entry, subject), column) in rule.conditions.iter().zip(subjects).zip(&table.inputs) {
            if entry.is_any() {
                continue;
            }

            let matched = self
                .evaluator
                .test(entry, subject, context)
                .map_err(|source| RuntimeError::Expression {
                    decision_id: decision_id.to_string(),
                    location: format!("rule '{}' input '{}'", rule.id, column.display_name()),
                    source,
                })?;

            if !matched {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn evaluate_outputs(
        &self,
        decision_id: &str,
        table: &DecisionTableProgram,
        rule: &TableRule,
        context: &EvaluationContext,
    ) -> Result<DecisionOutput> {
        let values = rule
            .outputs
            .iter()
            .zip(&table.outputs)
            .map(|(expression, column)| {
                let location = format!("rule '{}' output '{}'", rule.id, column.name);
                let value = self
                    .evaluator
                    .evaluate(expression, context)
                    .map_err(|source| RuntimeError::Expression {
                        decision_id: decision_id.to_string(),
                        location: location.clone(),
                        source,
                    })?;

                let value = column
                    .type_ref
                    .coerce(value)
                    .map_err(|e| RuntimeError::TypeError {
                        decision_id: decision_id.to_string(),
                        location,
                        message: e.to_string(),
                    })?;

                Ok(OutputValue::new(column.name.clone(), value))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(DecisionOutput::new(values, vec![rule.id.clone()]))
    }
}

impl Default for DecisionTableExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DecisionTableExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecisionTableExecutor").finish_non_exhaustive()
    }
}
