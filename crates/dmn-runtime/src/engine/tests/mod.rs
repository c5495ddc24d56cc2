//! Test modules for the decision table executor

use dmn_core::ast::{BuiltinAggregator, Expression, HitPolicy, Operator, UnaryTest, UnaryTests};
use dmn_core::ir::{
    CompiledExpression, DecisionTableProgram, InputColumn, InputEntry, OutputColumn, TableRule,
};
use dmn_core::{TypeRef, Value};

mod table_execution_test;

pub(super) fn literal(value: impl Into<Value>) -> CompiledExpression {
    let value = value.into();
    CompiledExpression::new(value.to_string(), Expression::literal(value))
}

pub(super) fn variable(path: &str) -> CompiledExpression {
    CompiledExpression::new(
        path,
        Expression::field_access(path.split('.').map(String::from).collect()),
    )
}

pub(super) fn input(path: &str, type_ref: TypeRef) -> InputColumn {
    InputColumn {
        id: None,
        label: Some(path.to_string()),
        expression: variable(path),
        type_ref,
    }
}

pub(super) fn output(name: &str, values: Vec<Value>) -> OutputColumn {
    OutputColumn {
        id: None,
        name: name.to_string(),
        type_ref: TypeRef::Any,
        values,
    }
}

pub(super) fn any() -> InputEntry {
    InputEntry::any("-")
}

pub(super) fn equals(value: impl Into<Value>) -> InputEntry {
    let value = value.into();
    InputEntry {
        text: value.to_string(),
        tests: Some(UnaryTests::any_of(vec![UnaryTest::equals(Expression::literal(value))])),
    }
}

pub(super) fn compare(op: Operator, value: impl Into<Value>) -> InputEntry {
    let value = value.into();
    InputEntry {
        text: format!("{} {}", op.symbol(), value),
        tests: Some(UnaryTests::any_of(vec![UnaryTest::compare(
            op,
            Expression::literal(value),
        )])),
    }
}

pub(super) fn rule(id: &str, conditions: Vec<InputEntry>, outputs: Vec<Value>) -> TableRule {
    TableRule {
        id: id.to_string(),
        description: None,
        conditions,
        outputs: outputs.into_iter().map(literal).collect(),
    }
}

pub(super) fn table(
    hit_policy: HitPolicy,
    inputs: Vec<InputColumn>,
    outputs: Vec<OutputColumn>,
    rules: Vec<TableRule>,
) -> DecisionTableProgram {
    DecisionTableProgram {
        hit_policy,
        aggregation: None,
        inputs,
        outputs,
        rules,
    }
}

/// Single-input, single-output table keyed on `amount`
pub(super) fn amount_table(
    hit_policy: HitPolicy,
    aggregation: Option<BuiltinAggregator>,
    rules: Vec<TableRule>,
) -> DecisionTableProgram {
    DecisionTableProgram {
        aggregation,
        ..table(
            hit_policy,
            vec![input("amount", TypeRef::Number)],
            vec![output("fee", Vec::new())],
            rules,
        )
    }
}
