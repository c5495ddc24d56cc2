//! Decision model parser
//!
//! Parses YAML model documents into `DecisionModel` AST nodes.
//!
//! ```yaml
//! definitions:
//!   id: dinner
//!   decisions:
//!     - id: dish
//!       decision_table:
//!         hit_policy: UNIQUE
//!         inputs:
//!           - expression: season
//!             type: string
//!         outputs:
//!           - name: dish
//!         rules:
//!           - input_entries: ['"Fall"']
//!             output_entries: ['"Spareribs"']
//! ```
//!
//! The parser checks document structure only. Hit policies, cell texts and
//! type references stay raw until the decision is compiled.

use crate::error::{ParseError, Result};
use crate::yaml_parser::YamlParser;
use dmn_core::ast::{
    DecisionDefinition, DecisionLogic, DecisionModel, RawDecisionTable, RawInputClause,
    RawOutputClause, RawRule,
};
use serde_yaml::Value as YamlValue;
use std::collections::HashSet;

const DEFINITIONS_FIELDS: &[&str] = &["id", "name", "namespace", "description", "decisions"];
const DECISION_FIELDS: &[&str] = &[
    "id",
    "name",
    "description",
    "decision_table",
    "literal_expression",
    "invocation",
    "context",
    "relation",
];
const TABLE_FIELDS: &[&str] = &[
    "id",
    "description",
    "hit_policy",
    "aggregation",
    "inputs",
    "outputs",
    "rules",
];
const INPUT_FIELDS: &[&str] = &["id", "label", "expression", "type"];
const OUTPUT_FIELDS: &[&str] = &["id", "name", "label", "type", "values"];
const RULE_FIELDS: &[&str] = &["id", "description", "input_entries", "output_entries"];

/// Keys that select a decision logic variant
const LOGIC_KEYS: &[&str] = &[
    "decision_table",
    "literal_expression",
    "invocation",
    "context",
    "relation",
];

/// Parser options
#[derive(Debug, Clone, Default)]
pub struct ParserOptions {
    /// Reject unknown fields instead of logging a warning
    pub strict_fields: bool,
}

/// Decision model parser
pub struct ModelParser;

impl ModelParser {
    /// Parse a model from a YAML string
    pub fn parse(yaml_str: &str, source_label: &str) -> Result<DecisionModel> {
        Self::parse_with_options(yaml_str, source_label, &ParserOptions::default())
    }

    /// Parse a model from a YAML string with explicit options
    pub fn parse_with_options(
        yaml_str: &str,
        source_label: &str,
        options: &ParserOptions,
    ) -> Result<DecisionModel> {
        let yaml = YamlParser::parse(yaml_str)?;
        Self::parse_from_yaml(&yaml, source_label, options)
    }

    /// Parse a model from a YAML value
    pub fn parse_from_yaml(
        yaml: &YamlValue,
        source_label: &str,
        options: &ParserOptions,
    ) -> Result<DecisionModel> {
        let definitions = yaml
            .get("definitions")
            .filter(|v| v.is_mapping())
            .ok_or_else(|| ParseError::MissingField {
                field: "definitions".to_string(),
            })?;

        Self::check_fields(definitions, DEFINITIONS_FIELDS, "definitions", options)?;

        let mut model = DecisionModel::new(source_label);
        model.id = YamlParser::get_optional_string(definitions, "id");
        model.name = YamlParser::get_optional_string(definitions, "name");

        let decisions = match definitions.get("decisions") {
            None | Some(YamlValue::Null) => &[][..],
            Some(YamlValue::Sequence(seq)) => seq.as_slice(),
            Some(_) => {
                return Err(ParseError::InvalidValue {
                    field: "definitions.decisions".to_string(),
                    message: "expected a list of decisions".to_string(),
                })
            }
        };

        let mut seen = HashSet::new();
        for (index, decision_yaml) in decisions.iter().enumerate() {
            let decision = Self::parse_decision(decision_yaml, index, options)?;
            if !seen.insert(decision.id.clone()) {
                return Err(ParseError::DuplicateDecision(decision.id));
            }
            model.decisions.push(decision);
        }

        log::debug!(
            "Parsed model '{}' with {} decision(s)",
            source_label,
            model.decision_count()
        );

        Ok(model)
    }

    /// Parse a decision
    fn parse_decision(
        yaml: &YamlValue,
        index: usize,
        options: &ParserOptions,
    ) -> Result<DecisionDefinition> {
        let context = format!("decisions[{}]", index);
        Self::check_fields(yaml, DECISION_FIELDS, &context, options)?;

        let id = YamlParser::get_string(yaml, "id").map_err(|_| ParseError::MissingField {
            field: format!("{}.id", context),
        })?;
        let name = YamlParser::get_optional_string(yaml, "name");

        let present: Vec<&str> = LOGIC_KEYS
            .iter()
            .copied()
            .filter(|key| YamlParser::has_field(yaml, key))
            .collect();

        let logic = match present.as_slice() {
            [] => DecisionLogic::Empty,
            ["decision_table"] => {
                let table_yaml = &yaml["decision_table"];
                DecisionLogic::DecisionTable(Self::parse_table(table_yaml, &id, options)?)
            }
            ["literal_expression"] => DecisionLogic::LiteralExpression {
                text: Self::literal_expression_text(&yaml["literal_expression"]),
            },
            [key] => {
                let payload = serde_json::to_value(&yaml[*key]).map_err(|e| {
                    ParseError::InvalidValue {
                        field: format!("{}.{}", context, key),
                        message: e.to_string(),
                    }
                })?;
                match *key {
                    "invocation" => DecisionLogic::Invocation { payload },
                    "context" => DecisionLogic::Context { payload },
                    _ => DecisionLogic::Relation { payload },
                }
            }
            _ => {
                return Err(ParseError::InvalidValue {
                    field: context,
                    message: format!(
                        "decision '{}' declares more than one expression: {}",
                        id,
                        present.join(", ")
                    ),
                })
            }
        };

        let mut decision = DecisionDefinition::new(id, logic);
        decision.name = name;
        Ok(decision)
    }

    /// Parse a decision table payload
    fn parse_table(
        yaml: &YamlValue,
        decision_id: &str,
        options: &ParserOptions,
    ) -> Result<RawDecisionTable> {
        let context = format!("decision '{}'", decision_id);
        if !yaml.is_mapping() {
            return Err(ParseError::InvalidValue {
                field: format!("{}.decision_table", context),
                message: "expected a mapping".to_string(),
            });
        }
        Self::check_fields(yaml, TABLE_FIELDS, &format!("{} decision_table", context), options)?;

        let inputs = Self::sequence(yaml, "inputs", &context)?
            .iter()
            .enumerate()
            .map(|(i, input)| Self::parse_input(input, &format!("{} inputs[{}]", context, i), options))
            .collect::<Result<Vec<_>>>()?;

        let outputs = Self::sequence(yaml, "outputs", &context)?
            .iter()
            .enumerate()
            .map(|(i, output)| {
                Self::parse_output(output, &format!("{} outputs[{}]", context, i), options)
            })
            .collect::<Result<Vec<_>>>()?;

        let rules = Self::sequence(yaml, "rules", &context)?
            .iter()
            .enumerate()
            .map(|(i, rule)| Self::parse_rule(rule, &format!("{} rules[{}]", context, i), options))
            .collect::<Result<Vec<_>>>()?;

        Ok(RawDecisionTable {
            hit_policy: YamlParser::get_optional_scalar(yaml, "hit_policy"),
            aggregation: YamlParser::get_optional_scalar(yaml, "aggregation"),
            inputs,
            outputs,
            rules,
        })
    }

    /// Parse an input clause
    fn parse_input(yaml: &YamlValue, context: &str, options: &ParserOptions) -> Result<RawInputClause> {
        Self::check_fields(yaml, INPUT_FIELDS, context, options)?;

        let expression = YamlParser::get_optional_scalar(yaml, "expression")
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| ParseError::MissingField {
                field: format!("{}.expression", context),
            })?;

        Ok(RawInputClause {
            id: YamlParser::get_optional_string(yaml, "id"),
            label: YamlParser::get_optional_string(yaml, "label"),
            expression,
            type_ref: YamlParser::get_optional_string(yaml, "type"),
        })
    }

    /// Parse an output clause
    fn parse_output(yaml: &YamlValue, context: &str, options: &ParserOptions) -> Result<RawOutputClause> {
        Self::check_fields(yaml, OUTPUT_FIELDS, context, options)?;

        Ok(RawOutputClause {
            id: YamlParser::get_optional_string(yaml, "id"),
            name: YamlParser::get_optional_string(yaml, "name")
                .or_else(|| YamlParser::get_optional_string(yaml, "label")),
            type_ref: YamlParser::get_optional_string(yaml, "type"),
            values: Self::cells(yaml, "values", context)?,
        })
    }

    /// Parse a rule
    fn parse_rule(yaml: &YamlValue, context: &str, options: &ParserOptions) -> Result<RawRule> {
        Self::check_fields(yaml, RULE_FIELDS, context, options)?;

        Ok(RawRule {
            id: YamlParser::get_optional_scalar(yaml, "id"),
            description: YamlParser::get_optional_string(yaml, "description"),
            input_entries: Self::cells(yaml, "input_entries", context)?,
            output_entries: Self::cells(yaml, "output_entries", context)?,
        })
    }

    /// Text of a literal expression, given inline or as `text:`
    fn literal_expression_text(yaml: &YamlValue) -> String {
        YamlParser::get_optional_scalar(yaml, "text").unwrap_or_else(|| YamlParser::to_string(yaml))
    }

    /// Optional list field; a missing or null field is an empty list
    fn sequence<'a>(yaml: &'a YamlValue, field: &str, context: &str) -> Result<&'a [YamlValue]> {
        match yaml.get(field) {
            None | Some(YamlValue::Null) => Ok(&[]),
            Some(_) => YamlParser::get_optional_array(yaml, field)
                .map(Vec::as_slice)
                .ok_or_else(|| ParseError::InvalidValue {
                    field: format!("{}.{}", context, field),
                    message: "expected a list".to_string(),
                }),
        }
    }

    /// List of cell texts; scalars render as text, `null` as the empty cell
    fn cells(yaml: &YamlValue, field: &str, context: &str) -> Result<Vec<String>> {
        Self::sequence(yaml, field, context)?
            .iter()
            .map(|cell| match cell {
                YamlValue::Sequence(_) | YamlValue::Mapping(_) => Err(ParseError::InvalidValue {
                    field: format!("{}.{}", context, field),
                    message: "cells must be scalars".to_string(),
                }),
                scalar => Ok(YamlParser::to_string(scalar)),
            })
            .collect()
    }

    /// Warn about unknown fields, or reject them in strict mode
    fn check_fields(
        yaml: &YamlValue,
        known: &[&str],
        context: &str,
        options: &ParserOptions,
    ) -> Result<()> {
        if options.strict_fields {
            return YamlParser::validate_fields_strict(yaml, known, context);
        }

        for warning in YamlParser::validate_fields(yaml, known, context) {
            log::warn!("{}", warning);
        }
        Ok(())
    }
}
