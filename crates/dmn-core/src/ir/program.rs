//! Compiled decision
//!
//! A compiled decision is the executable form of exactly one decision
//! definition, with metadata describing where it came from.

use crate::ast::LogicKind;
use crate::ir::DecisionTableProgram;
use serde::{Deserialize, Serialize};

/// A compiled decision ready for evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledDecision {
    /// Decision metadata
    pub metadata: DecisionMetadata,

    /// Executable logic
    pub logic: CompiledLogic,
}

/// Executable logic variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompiledLogic {
    DecisionTable(DecisionTableProgram),
}

/// Metadata associated with a compiled decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionMetadata {
    /// Decision identifier
    pub decision_id: String,

    /// Optional decision name
    pub name: Option<String>,

    /// Label of the model source the decision was compiled from
    pub source_label: String,

    /// Logic variant of the source definition
    pub logic_kind: LogicKind,

    /// Version of the compiler that generated this
    pub compiler_version: String,
}

impl CompiledDecision {
    /// Create a new compiled decision
    pub fn new(metadata: DecisionMetadata, logic: CompiledLogic) -> Self {
        Self { metadata, logic }
    }

    pub fn id(&self) -> &str {
        &self.metadata.decision_id
    }

    /// The decision table, if the logic is one
    pub fn decision_table(&self) -> Option<&DecisionTableProgram> {
        match &self.logic {
            CompiledLogic::DecisionTable(table) => Some(table),
        }
    }
}

impl DecisionMetadata {
    /// Create new metadata for a decision table
    pub fn for_decision_table(decision_id: String, source_label: String) -> Self {
        Self {
            decision_id,
            name: None,
            source_label,
            logic_kind: LogicKind::DecisionTable,
            compiler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Set the name
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }
}
