//! Evaluation result types
//!
//! A `DecisionResult` is an ordered list of output entries; each entry is an
//! ordered list of named values. Both are built once and never mutated.

use crate::error::{Result, RuntimeError};
use dmn_core::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named output value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputValue {
    /// Output column name
    pub name: String,

    pub value: Value,
}

/// One output entry of a decision result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutput {
    values: Vec<OutputValue>,

    /// Ids of the rules that produced this entry
    #[serde(default)]
    rule_ids: Vec<String>,
}

/// Result of evaluating a decision
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    decision_id: String,
    outputs: Vec<DecisionOutput>,
}

impl OutputValue {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl DecisionOutput {
    /// Create an output entry from its values and the rules that produced it
    pub fn new(values: Vec<OutputValue>, rule_ids: Vec<String>) -> Self {
        Self { values, rule_ids }
    }

    /// Value at a column index
    pub fn get(&self, index: usize) -> Option<&OutputValue> {
        self.values.get(index)
    }

    /// Value by output name
    pub fn get_by_name(&self, name: &str) -> Option<&OutputValue> {
        self.values.iter().find(|v| v.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get_by_name(name).map(|v| &v.value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The only value of a single-output entry
    pub fn single_value(&self) -> Option<&Value> {
        match self.values.as_slice() {
            [only] => Some(&only.value),
            _ => None,
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.values.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn values(&self) -> &[OutputValue] {
        &self.values
    }

    pub fn rule_ids(&self) -> &[String] {
        &self.rule_ids
    }

    pub fn to_map(&self) -> BTreeMap<String, Value> {
        self.values
            .iter()
            .map(|v| (v.name.clone(), v.value.clone()))
            .collect()
    }

    /// The values without the producing rules, used to compare entries
    pub(crate) fn same_values(&self, other: &DecisionOutput) -> bool {
        self.values == other.values
    }
}

impl DecisionResult {
    /// Create a result from its output entries
    pub fn new(decision_id: impl Into<String>, outputs: Vec<DecisionOutput>) -> Self {
        Self {
            decision_id: decision_id.into(),
            outputs,
        }
    }

    /// A result without output entries
    pub fn empty(decision_id: impl Into<String>) -> Self {
        Self::new(decision_id, Vec::new())
    }

    pub fn decision_id(&self) -> &str {
        &self.decision_id
    }

    pub fn outputs(&self) -> &[DecisionOutput] {
        &self.outputs
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DecisionOutput> {
        self.outputs.iter()
    }

    pub fn first(&self) -> Option<&DecisionOutput> {
        self.outputs.first()
    }

    /// The only output entry, `None` for an empty result.
    ///
    /// Fails with `NotUnique` when the result holds more than one entry.
    pub fn single_output(&self) -> Result<Option<&DecisionOutput>> {
        match self.outputs.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(only)),
            outputs => Err(RuntimeError::NotUnique(outputs.len())),
        }
    }

    /// Values of one output name across all entries, in entry order
    pub fn collect_values(&self, name: &str) -> Vec<&Value> {
        self.outputs.iter().filter_map(|o| o.value(name)).collect()
    }

    /// Ids of the rules that produced the entries, in entry order
    pub fn matched_rules(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for id in self.outputs.iter().flat_map(|o| o.rule_ids.iter()) {
            if !ids.contains(&id.as_str()) {
                ids.push(id);
            }
        }
        ids
    }

    /// Consume the result, returning its output entries
    pub fn into_outputs(self) -> Vec<DecisionOutput> {
        self.outputs
    }
}

impl<'a> IntoIterator for &'a DecisionResult {
    type Item = &'a DecisionOutput;
    type IntoIter = std::slice::Iter<'a, DecisionOutput>;

    fn into_iter(self) -> Self::IntoIter {
        self.outputs.iter()
    }
}

impl IntoIterator for DecisionResult {
    type Item = DecisionOutput;
    type IntoIter = std::vec::IntoIter<DecisionOutput>;

    fn into_iter(self) -> Self::IntoIter {
        self.outputs.into_iter()
    }
}
