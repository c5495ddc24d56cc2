//! Unit tests for compiler components
//!
//! Tests resolution and compilation of models produced by the parser.

use dmn_compiler::*;
use dmn_core::ast::{BuiltinAggregator, HitPolicy, UnaryTest};
use dmn_core::Value;
use dmn_parser::ModelParser;

const HOLIDAYS: &str = r#"
definitions:
  decisions:
    - id: holidays
      decision_table:
        hit_policy: collect
        aggregation: sum
        inputs:
          - expression: age
            type: number
        outputs:
          - name: days
            type: number
        rules:
          - input_entries: ['-']
            output_entries: ['22']
          - input_entries: ['< 18, >= 60']
            output_entries: ['5']
          - input_entries: ['[45..60[']
            output_entries: ['2']
    - id: literal
      literal_expression: "age + 1"
"#;

// =============================================================================
// Resolution + compilation
// =============================================================================

#[test]
fn test_compile_parsed_collect_table() {
    let model = ModelParser::parse(HOLIDAYS, "holidays.dmn").unwrap();
    let compiled = Compiler::new().compile_decision(&model, Some("holidays")).unwrap();

    let table = compiled.decision_table().unwrap();
    assert_eq!(table.hit_policy, HitPolicy::Collect);
    assert_eq!(table.aggregation, Some(BuiltinAggregator::Sum));
    assert_eq!(table.rule_count(), 3);

    let second = table.rules[1].conditions[0].tests.as_ref().unwrap();
    assert_eq!(second.tests.len(), 2);
    assert!(matches!(
        table.rules[2].conditions[0].tests.as_ref().unwrap().tests[0],
        UnaryTest::Range { start_inclusive: true, end_inclusive: false, .. }
    ));
}

#[test]
fn test_ambiguous_model_requires_id() {
    let model = ModelParser::parse(HOLIDAYS, "holidays.dmn").unwrap();
    let err = Compiler::new().compile_decision(&model, None).unwrap_err();

    assert!(matches!(err, CompileError::AmbiguousDecision { count: 2, .. }));
    assert!(err.to_string().contains("holidays.dmn"));
}

#[test]
fn test_literal_expression_is_unsupported() {
    let model = ModelParser::parse(HOLIDAYS, "holidays.dmn").unwrap();
    let err = Compiler::new().compile_decision(&model, Some("literal")).unwrap_err();

    assert_eq!(
        err.to_string(),
        "The expression type of the decision 'literal' is not supported. \
         Only decision tables are supported, found literal expression"
    );
}

#[test]
fn test_compiled_decision_does_not_borrow_model() {
    let compiled = {
        let model = ModelParser::parse(HOLIDAYS, "holidays.dmn").unwrap();
        Compiler::new().compile_decision(&model, Some("holidays")).unwrap()
    };
    assert_eq!(compiled.metadata.source_label, "holidays.dmn");
}

#[test]
fn test_compile_is_idempotent() {
    let model = ModelParser::parse(HOLIDAYS, "holidays.dmn").unwrap();
    let compiler = Compiler::new();

    let first = compiler.compile_decision(&model, Some("holidays")).unwrap();
    let second = compiler.compile_decision(&model, Some("holidays")).unwrap();
    assert_eq!(first, second);
}

// =============================================================================
// Table shape errors
// =============================================================================

#[test]
fn test_priority_without_values_fails() {
    let yaml = r#"
definitions:
  decisions:
    - id: risk
      decision_table:
        hit_policy: PRIORITY
        outputs:
          - name: level
        rules:
          - output_entries: ['"high"']
"#;
    let model = ModelParser::parse(yaml, "risk.dmn").unwrap();
    let err = Compiler::new().compile_decision(&model, None).unwrap_err();
    assert!(matches!(err, CompileError::InvalidTable { .. }));
}

#[test]
fn test_priority_values_in_order() {
    let yaml = r#"
definitions:
  decisions:
    - id: risk
      decision_table:
        hit_policy: P
        outputs:
          - name: level
            type: string
            values: ['"high"', '"medium"', '"low"']
        rules:
          - output_entries: ['"low"']
"#;
    let model = ModelParser::parse(yaml, "risk.dmn").unwrap();
    let compiled = Compiler::new().compile_decision(&model, None).unwrap();
    let table = compiled.decision_table().unwrap();

    assert_eq!(table.hit_policy, HitPolicy::Priority);
    assert_eq!(table.priority_key(&[Value::from("medium")]), vec![1]);
}

#[test]
fn test_invalid_cell_names_rule_and_column() {
    let yaml = r#"
definitions:
  decisions:
    - id: dish
      decision_table:
        inputs:
          - label: Season
            expression: season
        outputs:
          - name: dish
        rules:
          - id: broken
            input_entries: ['"Fall']
            output_entries: ['"Stew"']
"#;
    let model = ModelParser::parse(yaml, "dish.dmn").unwrap();
    let err = Compiler::new().compile_decision(&model, None).unwrap_err();
    let message = err.to_string();

    assert!(message.contains("rule 'broken' input 'Season'"));
    assert!(message.contains("decision 'dish'"));
}
