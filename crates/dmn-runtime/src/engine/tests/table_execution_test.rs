//! Table execution tests: matching, coercion and error reporting

use super::*;
use crate::context::EvaluationContext;
use crate::engine::{DecisionTableExecutor, ExpressionEvaluator};
use crate::error::{EvalError, ExpressionError, RuntimeError};
use dmn_core::ast::LogicKind;
use dmn_core::ir::{CompiledDecision, CompiledLogic, DecisionMetadata};
use std::sync::Arc;

fn season_table() -> DecisionTableProgram {
    table(
        HitPolicy::Unique,
        vec![input("season", TypeRef::String), input("guests", TypeRef::Number)],
        vec![output("dish", Vec::new())],
        vec![
            rule("r1", vec![equals("Fall"), compare(Operator::Le, 8)], vec![Value::from("Spareribs")]),
            rule("r2", vec![equals("Winter"), compare(Operator::Le, 8)], vec![Value::from("Roastbeef")]),
            rule("r3", vec![equals("Spring"), compare(Operator::Le, 4)], vec![Value::from("Dry Aged Gourmet Steak")]),
            rule("r4", vec![equals("Spring"), compare(Operator::Gt, 4)], vec![Value::from("Steak")]),
            rule("r5", vec![any(), compare(Operator::Gt, 8)], vec![Value::from("Stew")]),
        ],
    )
}

fn execute(program: &DecisionTableProgram, ctx: &EvaluationContext) -> crate::Result<crate::DecisionResult> {
    DecisionTableExecutor::new().execute_table("dish", program, ctx)
}

// ===========================================
// Matching
// ===========================================

#[test]
fn test_matches_single_rule() {
    let ctx = EvaluationContext::new()
        .with_variable("season", "Winter")
        .with_variable("guests", 4);

    let result = execute(&season_table(), &ctx).unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result.decision_id(), "dish");
    assert_eq!(result.first().unwrap().value("dish"), Some(&Value::from("Roastbeef")));
    assert_eq!(result.matched_rules(), vec!["r2"]);
}

#[test]
fn test_no_match_yields_empty_result() {
    let ctx = EvaluationContext::new()
        .with_variable("season", "Summer")
        .with_variable("guests", 2);

    let result = execute(&season_table(), &ctx).unwrap();
    assert!(result.is_empty());
    assert!(result.matched_rules().is_empty());
}

#[test]
fn test_dont_care_matches_everything() {
    let ctx = EvaluationContext::new()
        .with_variable("season", "Summer")
        .with_variable("guests", 12);

    let result = execute(&season_table(), &ctx).unwrap();
    assert_eq!(result.first().unwrap().single_value(), Some(&Value::from("Stew")));
}

#[test]
fn test_input_is_coerced_before_testing() {
    // Numeric strings are accepted by a number column
    let ctx = EvaluationContext::new()
        .with_variable("season", "Spring")
        .with_variable("guests", "3");

    let result = execute(&season_table(), &ctx).unwrap();
    assert_eq!(
        result.first().unwrap().value("dish"),
        Some(&Value::from("Dry Aged Gourmet Steak"))
    );
}

#[test]
fn test_zero_inputs_first_policy() {
    let program = table(
        HitPolicy::First,
        Vec::new(),
        vec![output("result", Vec::new())],
        vec![
            rule("r1", Vec::new(), vec![Value::from("ok")]),
            rule("r2", Vec::new(), vec![Value::from("second")]),
        ],
    );

    let result = execute(&program, &EvaluationContext::new()).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.first().unwrap().single_value(), Some(&Value::from("ok")));

    let no_rules = table(HitPolicy::First, Vec::new(), vec![output("result", Vec::new())], Vec::new());
    assert!(execute(&no_rules, &EvaluationContext::new()).unwrap().is_empty());
}

#[test]
fn test_zero_outputs() {
    let program = table(HitPolicy::Collect, Vec::new(), Vec::new(), vec![rule("r1", Vec::new(), Vec::new())]);

    let result = execute(&program, &EvaluationContext::new()).unwrap();
    assert_eq!(result.len(), 1);
    assert!(result.first().unwrap().is_empty());
}

#[test]
fn test_output_expressions_read_context() {
    let mut program = amount_table(HitPolicy::Unique, None, Vec::new());
    program.rules.push(TableRule {
        id: "r1".to_string(),
        description: None,
        conditions: vec![any()],
        outputs: vec![CompiledExpression::new(
            "amount * 0.1",
            Expression::binary(
                Expression::field_access(vec!["amount".to_string()]),
                Operator::Mul,
                Expression::literal(Value::from(0.1)),
            ),
        )],
    });

    let ctx = EvaluationContext::new().with_variable("amount", 50);
    let result = execute(&program, &ctx).unwrap();
    assert_eq!(result.first().unwrap().value("fee"), Some(&Value::from(5.0)));
}

#[test]
fn test_execute_compiled_decision() {
    let decision = CompiledDecision::new(
        DecisionMetadata::for_decision_table("dish".to_string(), "dish.dmn.yaml".to_string()),
        CompiledLogic::DecisionTable(season_table()),
    );
    assert_eq!(decision.metadata.logic_kind, LogicKind::DecisionTable);

    let ctx = EvaluationContext::new()
        .with_variable("season", "Fall")
        .with_variable("guests", 8);
    let result = DecisionTableExecutor::new().execute(&decision, &ctx).unwrap();
    assert_eq!(result.first().unwrap().value("dish"), Some(&Value::from("Spareribs")));
}

// ===========================================
// Errors
// ===========================================

#[test]
fn test_unknown_variable_is_expression_error() {
    let ctx = EvaluationContext::new().with_variable("season", "Fall");

    let err = execute(&season_table(), &ctx).unwrap_err();
    match err {
        RuntimeError::Expression {
            decision_id,
            location,
            source,
        } => {
            assert_eq!(decision_id, "dish");
            assert_eq!(location, "input 'guests'");
            assert_eq!(source.expression, "guests");
            assert_eq!(source.cause, EvalError::UnknownVariable("guests".to_string()));
            assert!(source.context.contains_key("season"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_incompatible_comparison_names_the_rule() {
    let ctx = EvaluationContext::new()
        .with_variable("season", "Fall")
        .with_variable("guests", true);

    // Boolean subject in a number column fails coercion
    let err = execute(&season_table(), &ctx).unwrap_err();
    assert!(matches!(err, RuntimeError::TypeError { ref location, .. } if location == "input 'guests'"));

    let mut program = season_table();
    program.inputs[1].type_ref = TypeRef::Any;
    let ctx = EvaluationContext::new()
        .with_variable("season", "Fall")
        .with_variable("guests", "many");

    let err = execute(&program, &ctx).unwrap_err();
    assert!(err.to_string().contains("rule 'r1' input 'guests'"), "{err}");
}

#[test]
fn test_output_coercion_failure() {
    let mut program = amount_table(
        HitPolicy::Unique,
        None,
        vec![rule("r1", vec![any()], vec![Value::from("free")])],
    );
    program.outputs[0].type_ref = TypeRef::Number;

    let ctx = EvaluationContext::new().with_variable("amount", 1);
    let err = execute(&program, &ctx).unwrap_err();
    match err {
        RuntimeError::TypeError { location, message, .. } => {
            assert_eq!(location, "rule 'r1' output 'fee'");
            assert!(message.contains("free"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ===========================================
// Custom evaluator
// ===========================================

/// Evaluator treating every expression as the constant 7 and every test as passing
struct SevenEvaluator;

impl ExpressionEvaluator for SevenEvaluator {
    fn evaluate(
        &self,
        _expression: &CompiledExpression,
        _context: &EvaluationContext,
    ) -> Result<Value, ExpressionError> {
        Ok(Value::from(7))
    }

    fn test(
        &self,
        _entry: &InputEntry,
        _subject: &Value,
        _context: &EvaluationContext,
    ) -> Result<bool, ExpressionError> {
        Ok(true)
    }
}

#[test]
fn test_custom_evaluator() {
    let executor = DecisionTableExecutor::with_evaluator(Arc::new(SevenEvaluator));
    let program = amount_table(
        HitPolicy::First,
        None,
        vec![rule("r1", vec![equals(1)], vec![Value::from("ignored")])],
    );

    // No variables bound: the custom evaluator never looks them up
    let result = executor.execute_table("fee", &program, &EvaluationContext::new()).unwrap();
    assert_eq!(result.first().unwrap().value("fee"), Some(&Value::from(7)));
}

// ===========================================
// Concurrency
// ===========================================

#[test]
fn test_concurrent_evaluation_is_deterministic() {
    let executor = DecisionTableExecutor::new();
    let program = season_table();
    let ctx = EvaluationContext::new()
        .with_variable("season", "Winter")
        .with_variable("guests", 6);
    let expected = serde_json::to_string(&execute(&program, &ctx).unwrap()).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| executor.execute_table("dish", &program, &ctx.clone()).unwrap()))
            .collect();

        for handle in handles {
            let result = handle.join().unwrap();
            assert_eq!(serde_json::to_string(&result).unwrap(), expected);
        }
    });
}
