//! Decision table compiler
//!
//! Compiles a raw decision table payload into a `DecisionTableProgram`:
//! hit policy and aggregation tokens, type references, column expressions
//! and every rule cell are parsed and checked here, so evaluation never
//! sees a malformed table.

use crate::codegen::expression_codegen::ExpressionCompiler;
use crate::error::{CompileError, Result};
use crate::validator::TableValidator;
use dmn_core::ast::{
    BuiltinAggregator, HitPolicy, RawDecisionTable, RawInputClause, RawOutputClause, RawRule,
};
use dmn_core::ir::{DecisionTableProgram, InputColumn, OutputColumn, TableRule};
use dmn_core::{TypeRef, Value};
use dmn_parser::ParseError;

/// Decision table compiler
pub struct DecisionTableCompiler<'a> {
    decision_id: &'a str,
    expressions: ExpressionCompiler,
}

impl<'a> DecisionTableCompiler<'a> {
    /// Create a compiler for the table of one decision
    pub fn new(decision_id: &'a str, fold_constants: bool) -> Self {
        Self {
            decision_id,
            expressions: ExpressionCompiler::new(fold_constants),
        }
    }

    /// Compile a decision table
    pub fn compile(
        &self,
        table: &RawDecisionTable,
        default_hit_policy: HitPolicy,
    ) -> Result<DecisionTableProgram> {
        let hit_policy = match &table.hit_policy {
            Some(token) => token
                .parse::<HitPolicy>()
                .map_err(|_| CompileError::UnknownHitPolicy {
                    decision_id: self.decision_id.to_string(),
                    token: token.clone(),
                })?,
            None => default_hit_policy,
        };

        let aggregation = table
            .aggregation
            .as_ref()
            .filter(|token| !token.trim().is_empty())
            .map(|token| {
                token
                    .parse::<BuiltinAggregator>()
                    .map_err(|_| CompileError::UnknownAggregation {
                        decision_id: self.decision_id.to_string(),
                        token: token.clone(),
                    })
            })
            .transpose()?;

        let inputs = table
            .inputs
            .iter()
            .enumerate()
            .map(|(index, input)| self.compile_input(index, input))
            .collect::<Result<Vec<_>>>()?;

        let outputs = table
            .outputs
            .iter()
            .enumerate()
            .map(|(index, output)| self.compile_output(index, output))
            .collect::<Result<Vec<_>>>()?;

        let rules = table
            .rules
            .iter()
            .enumerate()
            .map(|(index, rule)| self.compile_rule(index, rule, &inputs, &outputs))
            .collect::<Result<Vec<_>>>()?;

        let program = DecisionTableProgram {
            hit_policy,
            aggregation,
            inputs,
            outputs,
            rules,
        };

        TableValidator::validate(self.decision_id, &program)?;

        Ok(program)
    }

    fn compile_input(&self, index: usize, input: &RawInputClause) -> Result<InputColumn> {
        let location = match input.label.as_deref().or(input.id.as_deref()) {
            Some(name) => format!("input '{}'", name),
            None => format!("input {}", index + 1),
        };

        let type_ref = self.type_ref(input.type_ref.as_deref(), &location)?;
        let expression = self
            .expressions
            .compile_expression(&input.expression)
            .map_err(|e| self.invalid_expression(&location, e))?;

        Ok(InputColumn {
            id: input.id.clone(),
            label: input.label.clone(),
            expression,
            type_ref,
        })
    }

    fn compile_output(&self, index: usize, output: &RawOutputClause) -> Result<OutputColumn> {
        let name = output
            .name
            .clone()
            .or_else(|| output.id.clone())
            .unwrap_or_else(|| format!("output{}", index + 1));
        let location = format!("output '{}'", name);

        let type_ref = self.type_ref(output.type_ref.as_deref(), &location)?;

        let values = output
            .values
            .iter()
            .map(|text| self.output_value(text, type_ref, &location))
            .collect::<Result<Vec<_>>>()?;

        Ok(OutputColumn {
            id: output.id.clone(),
            name,
            type_ref,
            values,
        })
    }

    /// An entry of an output column's values list: a literal coerced to the column type
    fn output_value(&self, text: &str, type_ref: TypeRef, location: &str) -> Result<Value> {
        let compiled = self
            .expressions
            .compile_expression(text)
            .map_err(|e| self.invalid_expression(location, e))?;

        let value = compiled.expr.as_constant().ok_or_else(|| CompileError::InvalidTable {
            decision_id: self.decision_id.to_string(),
            message: format!("{} declares a non-literal value '{}'", location, text),
        })?;

        type_ref.coerce(value).map_err(|e| CompileError::InvalidTable {
            decision_id: self.decision_id.to_string(),
            message: format!("{} value '{}': {}", location, text, e),
        })
    }

    fn compile_rule(
        &self,
        index: usize,
        rule: &RawRule,
        inputs: &[InputColumn],
        outputs: &[OutputColumn],
    ) -> Result<TableRule> {
        let id = rule
            .id
            .clone()
            .unwrap_or_else(|| format!("rule{}", index + 1));

        if rule.input_entries.len() != inputs.len() {
            return Err(self.arity_mismatch(&id, "input", rule.input_entries.len(), inputs.len()));
        }
        if rule.output_entries.len() != outputs.len() {
            return Err(self.arity_mismatch(&id, "output", rule.output_entries.len(), outputs.len()));
        }

        let conditions = rule
            .input_entries
            .iter()
            .zip(inputs)
            .map(|(text, column)| {
                self.expressions.compile_input_entry(text).map_err(|e| {
                    let location = format!("rule '{}' input '{}'", id, column.display_name());
                    self.invalid_expression(&location, e)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let output_entries = rule
            .output_entries
            .iter()
            .zip(outputs)
            .map(|(text, column)| {
                self.expressions.compile_output_entry(text).map_err(|e| {
                    let location = format!("rule '{}' output '{}'", id, column.name);
                    self.invalid_expression(&location, e)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TableRule {
            id,
            description: rule.description.clone(),
            conditions,
            outputs: output_entries,
        })
    }

    fn type_ref(&self, token: Option<&str>, location: &str) -> Result<TypeRef> {
        match token {
            None => Ok(TypeRef::Any),
            Some(token) => token.parse().map_err(|_| CompileError::UnknownTypeRef {
                decision_id: self.decision_id.to_string(),
                location: location.to_string(),
                token: token.to_string(),
            }),
        }
    }

    fn invalid_expression(&self, location: &str, source: ParseError) -> CompileError {
        CompileError::InvalidExpression {
            decision_id: self.decision_id.to_string(),
            location: location.to_string(),
            source,
        }
    }

    fn arity_mismatch(&self, rule_id: &str, kind: &str, found: usize, expected: usize) -> CompileError {
        CompileError::InvalidTable {
            decision_id: self.decision_id.to_string(),
            message: format!(
                "rule '{}' has {} {} entries, expected {}",
                rule_id, found, kind, expected
            ),
        }
    }
}
