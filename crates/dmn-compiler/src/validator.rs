//! Decision table validator
//!
//! Checks the combination of hit policy, aggregation and output columns of
//! a compiled table. Cell-level problems are reported by the codegen.

use crate::error::{CompileError, Result};
use dmn_core::ast::HitPolicy;
use dmn_core::ir::DecisionTableProgram;
use std::collections::HashSet;

/// Decision table validator
pub struct TableValidator;

impl TableValidator {
    /// Validate a compiled decision table
    pub fn validate(decision_id: &str, table: &DecisionTableProgram) -> Result<()> {
        let invalid = |message: String| CompileError::InvalidTable {
            decision_id: decision_id.to_string(),
            message,
        };

        if let Some(aggregation) = table.aggregation {
            if table.hit_policy != HitPolicy::Collect {
                return Err(invalid(format!(
                    "aggregation {} requires hit policy COLLECT, found {}",
                    aggregation, table.hit_policy
                )));
            }
            if table.output_count() != 1 {
                return Err(invalid(format!(
                    "aggregation {} requires exactly one output column, found {}",
                    aggregation,
                    table.output_count()
                )));
            }
        }

        if table.hit_policy.requires_output_values()
            && table.outputs.iter().all(|output| output.values.is_empty())
        {
            return Err(invalid(format!(
                "hit policy {} requires output values on at least one output column",
                table.hit_policy
            )));
        }

        let mut names = HashSet::new();
        for output in &table.outputs {
            if !names.insert(output.name.as_str()) {
                return Err(invalid(format!("duplicate output name '{}'", output.name)));
            }
        }

        let mut rule_ids = HashSet::new();
        for rule in &table.rules {
            if !rule_ids.insert(rule.id.as_str()) {
                return Err(invalid(format!("duplicate rule id '{}'", rule.id)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmn_core::ast::{BuiltinAggregator, Expression};
    use dmn_core::ir::{CompiledExpression, OutputColumn, TableRule};
    use dmn_core::{TypeRef, Value};

    fn output(name: &str, values: Vec<Value>) -> OutputColumn {
        OutputColumn {
            id: None,
            name: name.to_string(),
            type_ref: TypeRef::Any,
            values,
        }
    }

    fn rule(id: &str) -> TableRule {
        TableRule {
            id: id.to_string(),
            description: None,
            conditions: vec![],
            outputs: vec![CompiledExpression::new("1", Expression::literal(Value::Number(1.0)))],
        }
    }

    fn table(hit_policy: HitPolicy, aggregation: Option<BuiltinAggregator>) -> DecisionTableProgram {
        DecisionTableProgram {
            hit_policy,
            aggregation,
            inputs: vec![],
            outputs: vec![output("score", vec![])],
            rules: vec![rule("r1")],
        }
    }

    #[test]
    fn test_valid_collect_sum() {
        let table = table(HitPolicy::Collect, Some(BuiltinAggregator::Sum));
        assert!(TableValidator::validate("score", &table).is_ok());
    }

    #[test]
    fn test_aggregation_requires_collect() {
        let table = table(HitPolicy::First, Some(BuiltinAggregator::Sum));
        let err = TableValidator::validate("score", &table).unwrap_err();
        assert!(err.to_string().contains("requires hit policy COLLECT"));
    }

    #[test]
    fn test_aggregation_requires_single_output() {
        let mut table = table(HitPolicy::Collect, Some(BuiltinAggregator::Count));
        table.outputs.push(output("other", vec![]));
        let err = TableValidator::validate("score", &table).unwrap_err();
        assert!(err.to_string().contains("exactly one output column, found 2"));
    }

    #[test]
    fn test_priority_requires_output_values() {
        let mut table = table(HitPolicy::Priority, None);
        assert!(TableValidator::validate("score", &table).is_err());

        table.outputs[0].values = vec![Value::Number(1.0)];
        assert!(TableValidator::validate("score", &table).is_ok());

        let table = DecisionTableProgram {
            hit_policy: HitPolicy::OutputOrder,
            ..table
        };
        assert!(TableValidator::validate("score", &table).is_ok());
    }

    #[test]
    fn test_duplicate_names() {
        let mut table = table(HitPolicy::Unique, None);
        table.outputs.push(output("score", vec![]));
        assert!(TableValidator::validate("score", &table).is_err());

        let mut table = self::table(HitPolicy::Unique, None);
        table.rules.push(rule("r1"));
        let err = TableValidator::validate("score", &table).unwrap_err();
        assert!(err.to_string().contains("duplicate rule id 'r1'"));
    }
}
