//! YAML Parser
//!
//! Provides utilities for reading model documents into YAML values and for
//! pulling typed fields out of them.

use crate::error::{ParseError, Result};
use serde_yaml::Value as YamlValue;

/// YAML parser utilities
pub struct YamlParser;

impl YamlParser {
    /// Parse YAML string into a YAML value
    pub fn parse(yaml_str: &str) -> Result<YamlValue> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// Get a required string field from YAML object
    pub fn get_string(obj: &YamlValue, field: &str) -> Result<String> {
        obj.get(field)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| ParseError::MissingField {
                field: field.to_string(),
            })
    }

    /// Get an optional string field from YAML object
    pub fn get_optional_string(obj: &YamlValue, field: &str) -> Option<String> {
        obj.get(field)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }

    /// Get an optional scalar field rendered as text (numbers and booleans included)
    pub fn get_optional_scalar(obj: &YamlValue, field: &str) -> Option<String> {
        match obj.get(field)? {
            YamlValue::Null => None,
            value => Some(Self::to_string(value)),
        }
    }

    /// Get an optional array field from YAML object
    pub fn get_optional_array<'a>(obj: &'a YamlValue, field: &str) -> Option<&'a Vec<YamlValue>> {
        obj.get(field).and_then(|v| v.as_sequence())
    }

    /// Render a YAML scalar as cell text. `null` renders as the empty cell.
    pub fn to_string(value: &YamlValue) -> String {
        match value {
            YamlValue::Null => String::new(),
            YamlValue::Bool(b) => b.to_string(),
            YamlValue::Number(n) => n.to_string(),
            YamlValue::String(s) => s.clone(),
            YamlValue::Sequence(_) | YamlValue::Mapping(_) => {
                serde_yaml::to_string(value).unwrap_or_default()
            }
            YamlValue::Tagged(t) => Self::to_string(&t.value),
        }
    }

    /// Check if a field exists in YAML object
    pub fn has_field(obj: &YamlValue, field: &str) -> bool {
        obj.get(field).is_some()
    }

    /// Validate fields in a YAML object against a list of known fields
    /// Returns warnings for unknown fields with suggestions
    pub fn validate_fields(obj: &YamlValue, known_fields: &[&str], context: &str) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(mapping) = obj.as_mapping() {
            for (key, _) in mapping {
                if let Some(field_name) = key.as_str() {
                    if !known_fields.contains(&field_name) {
                        // Check if this is a common typo
                        let typo_correction = FIELD_CORRECTIONS
                            .iter()
                            .find(|(typo, _)| *typo == field_name)
                            .map(|(_, correct)| *correct)
                            .filter(|correct| known_fields.contains(correct));

                        let suggestion = if let Some(correct) = typo_correction {
                            format!(" Did you mean '{}'?", correct)
                        } else if let Some(similar) = Self::find_similar_field(field_name, known_fields)
                        {
                            format!(" Did you mean '{}'?", similar)
                        } else {
                            String::new()
                        };

                        warnings.push(format!(
                            "Unknown field '{}' in {}.{}",
                            field_name, context, suggestion
                        ));
                    }
                }
            }
        }

        warnings
    }

    /// Validate fields strictly - returns error if unknown fields found
    pub fn validate_fields_strict(obj: &YamlValue, known_fields: &[&str], context: &str) -> Result<()> {
        let errors = Self::validate_fields(obj, known_fields, context);

        if !errors.is_empty() {
            for error in &errors {
                log::error!("Field validation error: {}", error);
            }

            return Err(ParseError::InvalidValue {
                field: context.to_string(),
                message: errors.join("; "),
            });
        }

        Ok(())
    }

    /// Find similar field names using Levenshtein distance
    fn find_similar_field(field: &str, known_fields: &[&str]) -> Option<String> {
        known_fields
            .iter()
            .filter(|known| levenshtein_distance(field, known) <= 2)
            .min_by_key(|known| levenshtein_distance(field, known))
            .map(|s| s.to_string())
    }
}

/// Common field name typos and their corrections
const FIELD_CORRECTIONS: &[(&str, &str)] = &[
    ("decisionTable", "decision_table"),
    ("table", "decision_table"),
    ("literalExpression", "literal_expression"),
    ("hitPolicy", "hit_policy"),
    ("aggregator", "aggregation"),
    ("input", "inputs"),
    ("output", "outputs"),
    ("rule", "rules"),
    ("inputEntries", "input_entries"),
    ("outputEntries", "output_entries"),
    ("typeRef", "type"),
    ("type_ref", "type"),
    ("inputExpression", "expression"),
    ("allowed_values", "values"),
];

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for (i, &c1) in s1_chars.iter().enumerate() {
        for (j, &c2) in s2_chars.iter().enumerate() {
            let cost = if c1 == c2 { 0 } else { 1 };
            matrix[i + 1][j + 1] = std::cmp::min(
                std::cmp::min(
                    matrix[i][j + 1] + 1, // deletion
                    matrix[i + 1][j] + 1, // insertion
                ),
                matrix[i][j] + cost, // substitution
            );
        }
    }

    matrix[len1][len2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml() {
        let yaml_str = r#"
name: test
value: 42
enabled: true
"#;

        let yaml = YamlParser::parse(yaml_str).unwrap();
        assert!(yaml.is_mapping());
    }

    #[test]
    fn test_get_string() {
        let yaml = YamlParser::parse("id: dish\n").unwrap();
        assert_eq!(YamlParser::get_string(&yaml, "id").unwrap(), "dish");
        assert!(YamlParser::get_string(&yaml, "missing").is_err());
    }

    #[test]
    fn test_get_optional_scalar() {
        let yaml_str = r#"
count: 42
flag: true
text: Winter
nothing: ~
"#;

        let yaml = YamlParser::parse(yaml_str).unwrap();
        assert_eq!(YamlParser::get_optional_scalar(&yaml, "count"), Some("42".to_string()));
        assert_eq!(YamlParser::get_optional_scalar(&yaml, "flag"), Some("true".to_string()));
        assert_eq!(YamlParser::get_optional_scalar(&yaml, "text"), Some("Winter".to_string()));
        assert_eq!(YamlParser::get_optional_scalar(&yaml, "nothing"), None);
        assert_eq!(YamlParser::get_optional_scalar(&yaml, "missing"), None);
    }

    #[test]
    fn test_null_renders_as_empty_cell() {
        assert_eq!(YamlParser::to_string(&YamlValue::Null), "");
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = YamlParser::parse("invalid: yaml: content: [");
        assert!(matches!(result, Err(ParseError::YamlError(_))));
    }

    #[test]
    fn test_validate_fields_suggests_correction() {
        let yaml = YamlParser::parse("hitPolicy: FIRST\nrules: []\n").unwrap();
        let warnings = YamlParser::validate_fields(&yaml, &["hit_policy", "rules"], "decision_table");

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("hitPolicy"));
        assert!(warnings[0].contains("Did you mean 'hit_policy'?"));
    }

    #[test]
    fn test_validate_fields_fuzzy_suggestion() {
        let yaml = YamlParser::parse("ouputs: []\n").unwrap();
        let warnings = YamlParser::validate_fields(&yaml, &["inputs", "outputs"], "decision_table");

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Did you mean 'outputs'?"));
    }

    #[test]
    fn test_validate_fields_strict() {
        let yaml = YamlParser::parse("id: dish\ncolour: red\n").unwrap();
        assert!(YamlParser::validate_fields_strict(&yaml, &["id", "colour"], "decision").is_ok());

        let err = YamlParser::validate_fields_strict(&yaml, &["id"], "decision").unwrap_err();
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("rules", "rules"), 0);
        assert_eq!(levenshtein_distance("rule", "rules"), 1);
        assert_eq!(levenshtein_distance("", "abc"), 3);
    }
}
