//! Decision model AST definitions
//!
//! A `DecisionModel` is the parsed, read-only form of a model document. It
//! owns the declared decisions in declaration order. The decision logic is
//! kept as raw payload (cell texts, hit policy tokens) until the compiler
//! validates it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Parsed decision model (the model handle)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionModel {
    /// Optional model identifier
    pub id: Option<String>,

    /// Optional human-readable name
    pub name: Option<String>,

    /// Label of the source the model was parsed from (file name, stream label)
    pub source_label: String,

    /// Declared decisions, in declaration order
    pub decisions: Vec<DecisionDefinition>,
}

/// A declared decision with its raw logic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionDefinition {
    /// Identifier, unique within the model
    pub id: String,

    /// Optional human-readable name
    pub name: Option<String>,

    /// Decision logic payload
    pub logic: DecisionLogic,
}

/// Decision logic variants a model may declare
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionLogic {
    /// Decision table
    DecisionTable(RawDecisionTable),

    /// Single literal expression
    LiteralExpression { text: String },

    /// Invocation of a business knowledge model
    Invocation { payload: serde_json::Value },

    /// Boxed context
    Context { payload: serde_json::Value },

    /// Relation
    Relation { payload: serde_json::Value },

    /// No decision logic declared
    Empty,
}

/// Tag of a decision logic variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicKind {
    DecisionTable,
    LiteralExpression,
    Invocation,
    Context,
    Relation,
    Empty,
}

/// Raw decision table payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawDecisionTable {
    /// Hit policy token (e.g., "UNIQUE", "COLLECT")
    pub hit_policy: Option<String>,

    /// Aggregation token for COLLECT tables (e.g., "SUM")
    pub aggregation: Option<String>,

    /// Input columns
    pub inputs: Vec<RawInputClause>,

    /// Output columns
    pub outputs: Vec<RawOutputClause>,

    /// Rules (rows)
    pub rules: Vec<RawRule>,
}

/// Raw input column declaration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawInputClause {
    pub id: Option<String>,
    pub label: Option<String>,

    /// Input expression text
    pub expression: String,

    /// Type reference token
    pub type_ref: Option<String>,
}

/// Raw output column declaration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawOutputClause {
    pub id: Option<String>,
    pub name: Option<String>,

    /// Type reference token
    pub type_ref: Option<String>,

    /// Allowed output values, highest priority first
    #[serde(default)]
    pub values: Vec<String>,
}

/// Raw rule (row) of a decision table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawRule {
    pub id: Option<String>,
    pub description: Option<String>,

    /// One unary-test text per input column
    pub input_entries: Vec<String>,

    /// One expression text per output column
    pub output_entries: Vec<String>,
}

impl DecisionModel {
    /// Create an empty model for a source
    pub fn new(source_label: impl Into<String>) -> Self {
        Self {
            id: None,
            name: None,
            source_label: source_label.into(),
            decisions: Vec::new(),
        }
    }

    /// Set the model id
    pub fn with_id(mut self, id: String) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the model name
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Add a decision
    pub fn add_decision(mut self, decision: DecisionDefinition) -> Self {
        self.decisions.push(decision);
        self
    }

    /// Look up a decision by exact identifier
    pub fn decision(&self, id: &str) -> Option<&DecisionDefinition> {
        self.decisions.iter().find(|d| d.id == id)
    }

    /// Iterate over all declared decisions in declaration order
    pub fn decisions(&self) -> impl Iterator<Item = &DecisionDefinition> {
        self.decisions.iter()
    }

    pub fn decision_count(&self) -> usize {
        self.decisions.len()
    }

    /// Identifiers of all declared decisions
    pub fn decision_ids(&self) -> Vec<&str> {
        self.decisions.iter().map(|d| d.id.as_str()).collect()
    }
}

impl DecisionDefinition {
    /// Create a new decision definition
    pub fn new(id: impl Into<String>, logic: DecisionLogic) -> Self {
        Self {
            id: id.into(),
            name: None,
            logic,
        }
    }

    /// Set the name
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Tag of the decision's logic variant
    pub fn logic_kind(&self) -> LogicKind {
        self.logic.kind()
    }
}

impl DecisionLogic {
    pub fn kind(&self) -> LogicKind {
        match self {
            DecisionLogic::DecisionTable(_) => LogicKind::DecisionTable,
            DecisionLogic::LiteralExpression { .. } => LogicKind::LiteralExpression,
            DecisionLogic::Invocation { .. } => LogicKind::Invocation,
            DecisionLogic::Context { .. } => LogicKind::Context,
            DecisionLogic::Relation { .. } => LogicKind::Relation,
            DecisionLogic::Empty => LogicKind::Empty,
        }
    }
}

impl LogicKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicKind::DecisionTable => "decision table",
            LogicKind::LiteralExpression => "literal expression",
            LogicKind::Invocation => "invocation",
            LogicKind::Context => "context",
            LogicKind::Relation => "relation",
            LogicKind::Empty => "no expression",
        }
    }
}

impl fmt::Display for LogicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RawDecisionTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hit policy token
    pub fn with_hit_policy(mut self, hit_policy: impl Into<String>) -> Self {
        self.hit_policy = Some(hit_policy.into());
        self
    }

    /// Set the aggregation token
    pub fn with_aggregation(mut self, aggregation: impl Into<String>) -> Self {
        self.aggregation = Some(aggregation.into());
        self
    }

    /// Add an input column
    pub fn add_input(mut self, input: RawInputClause) -> Self {
        self.inputs.push(input);
        self
    }

    /// Add an output column
    pub fn add_output(mut self, output: RawOutputClause) -> Self {
        self.outputs.push(output);
        self
    }

    /// Add a rule
    pub fn add_rule(mut self, rule: RawRule) -> Self {
        self.rules.push(rule);
        self
    }
}

impl RawInputClause {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            ..Default::default()
        }
    }

    pub fn with_type_ref(mut self, type_ref: impl Into<String>) -> Self {
        self.type_ref = Some(type_ref.into());
        self
    }
}

impl RawOutputClause {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_type_ref(mut self, type_ref: impl Into<String>) -> Self {
        self.type_ref = Some(type_ref.into());
        self
    }

    pub fn with_values(mut self, values: Vec<String>) -> Self {
        self.values = values;
        self
    }
}

impl RawRule {
    pub fn new(input_entries: Vec<&str>, output_entries: Vec<&str>) -> Self {
        Self {
            id: None,
            description: None,
            input_entries: input_entries.into_iter().map(str::to_string).collect(),
            output_entries: output_entries.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
