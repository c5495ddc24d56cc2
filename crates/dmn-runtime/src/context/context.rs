//! Evaluation context
//!
//! The caller-supplied variable bindings a decision is evaluated against.
//! A context is owned by a single evaluation call and never mutated by it.

use super::field_lookup::{self, FieldLookup};
use dmn_core::Value;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Variable bindings for one evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationContext {
    variables: HashMap<String, Value>,
}

impl EvaluationContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method binding a variable
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Bind a variable, replacing any previous binding
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Load the value at a dotted path.
    ///
    /// Returns `None` when the root variable is unbound. Missing nested keys
    /// resolve to `Null`.
    pub fn load_field(&self, path: &[String]) -> Option<&Value> {
        match field_lookup::get_nested_value(&self.variables, path) {
            FieldLookup::Found(value) => Some(value),
            FieldLookup::UnknownRoot => None,
        }
    }

    /// Variables ordered by name, used for error reports
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.variables
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Variable names in sorted order
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.variables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Build a context from a JSON object; other JSON values are rejected
    pub fn from_json(json: serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Object(_) => serde_json::from_value(json).ok(),
            _ => None,
        }
    }
}

impl From<HashMap<String, Value>> for EvaluationContext {
    fn from(variables: HashMap<String, Value>) -> Self {
        Self { variables }
    }
}

impl From<BTreeMap<String, Value>> for EvaluationContext {
    fn from(variables: BTreeMap<String, Value>) -> Self {
        variables.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for EvaluationContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            variables: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_lookup() {
        let ctx = EvaluationContext::new()
            .with_variable("season", "Winter")
            .with_variable("guests", 8);

        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.get("season"), Some(&Value::from("Winter")));
        assert_eq!(ctx.load_field(&["guests".to_string()]), Some(&Value::from(8)));
        assert_eq!(ctx.load_field(&["missing".to_string()]), None);
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let ctx: EvaluationContext = vec![("b", 2), ("a", 1), ("c", 3)].into_iter().collect();
        let names: Vec<String> = ctx.snapshot().into_keys().collect();

        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(ctx.variable_names(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_from_json() {
        let ctx = EvaluationContext::from_json(serde_json::json!({
            "season": "Fall",
            "customer": { "age": 30 }
        }))
        .unwrap();

        assert_eq!(
            ctx.load_field(&["customer".to_string(), "age".to_string()]),
            Some(&Value::from(30))
        );
        assert!(EvaluationContext::from_json(serde_json::json!([1, 2])).is_none());
    }

    #[test]
    fn test_empty_context() {
        let ctx = EvaluationContext::default();
        assert!(ctx.is_empty());
        assert!(ctx.snapshot().is_empty());
    }
}
