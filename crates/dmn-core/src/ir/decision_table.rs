//! Compiled decision table
//!
//! Column declarations, rules with parsed cells and the validated hit policy.

use crate::ast::{BuiltinAggregator, Expression, HitPolicy, UnaryTests};
use crate::types::{TypeRef, Value};
use serde::{Deserialize, Serialize};

/// An expression together with the text it was parsed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledExpression {
    /// Source text, kept for error messages
    pub text: String,

    /// Parsed expression
    pub expr: Expression,
}

/// Executable decision table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTableProgram {
    pub hit_policy: HitPolicy,

    /// Only set for COLLECT tables
    pub aggregation: Option<BuiltinAggregator>,

    pub inputs: Vec<InputColumn>,
    pub outputs: Vec<OutputColumn>,
    pub rules: Vec<TableRule>,
}

/// Input column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputColumn {
    pub id: Option<String>,
    pub label: Option<String>,

    /// Expression producing the column subject
    pub expression: CompiledExpression,

    pub type_ref: TypeRef,
}

/// Output column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputColumn {
    pub id: Option<String>,

    /// Name under which values appear in output entries
    pub name: String,

    pub type_ref: TypeRef,

    /// Allowed values, highest priority first
    pub values: Vec<Value>,
}

/// Input entry of a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputEntry {
    pub text: String,

    /// `None` means "don't care"
    pub tests: Option<UnaryTests>,
}

/// A rule (row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRule {
    pub id: String,
    pub description: Option<String>,

    /// One entry per input column
    pub conditions: Vec<InputEntry>,

    /// One expression per output column
    pub outputs: Vec<CompiledExpression>,
}

impl CompiledExpression {
    pub fn new(text: impl Into<String>, expr: Expression) -> Self {
        Self {
            text: text.into(),
            expr,
        }
    }
}

impl DecisionTableProgram {
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn output_names(&self) -> Vec<&str> {
        self.outputs.iter().map(|o| o.name.as_str()).collect()
    }

    /// Priority key of a list of output values.
    ///
    /// For each output column declaring `values`, the index of the value in
    /// that list (unknown values rank last). Smaller keys rank higher.
    pub fn priority_key(&self, values: &[Value]) -> Vec<usize> {
        self.outputs
            .iter()
            .zip(values)
            .filter(|(column, _)| !column.values.is_empty())
            .map(|(column, value)| column.priority_of(value))
            .collect()
    }
}

impl InputColumn {
    /// Name used in diagnostics: label, id, then the expression text
    pub fn display_name(&self) -> &str {
        self.label
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or(&self.expression.text)
    }
}

impl OutputColumn {
    /// Index of a value in the allowed values list; unknown values rank last
    pub fn priority_of(&self, value: &Value) -> usize {
        self.values
            .iter()
            .position(|v| v == value)
            .unwrap_or(self.values.len())
    }
}

impl InputEntry {
    /// An entry that matches every subject
    pub fn any(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tests: None,
        }
    }

    pub fn is_any(&self) -> bool {
        self.tests.is_none()
    }
}
