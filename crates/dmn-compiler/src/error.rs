//! Compiler error types

use dmn_core::ast::LogicKind;
use dmn_parser::ParseError;
use thiserror::Error;

/// Compiler error
#[derive(Error, Debug)]
pub enum CompileError {
    /// Model declares no decision and no id was given
    #[error("Unable to find decision in resource '{source_label}'")]
    NoDecision { source_label: String },

    /// Requested decision id is not declared by the model
    #[error("Unable to find decision with id '{decision_id}' in resource '{source_label}'")]
    DecisionNotFound {
        decision_id: String,
        source_label: String,
    },

    /// Model declares several decisions and no id was given
    #[error(
        "Unable to determine decision: resource '{source_label}' declares {count} decisions, specify a decision id"
    )]
    AmbiguousDecision { source_label: String, count: usize },

    /// Decision logic variant is not implemented
    #[error(
        "The expression type of the decision '{decision_id}' is not supported. Only decision tables are supported, found {kind}"
    )]
    UnsupportedLogic { decision_id: String, kind: LogicKind },

    /// Unknown hit policy token
    #[error("Unknown hit policy '{token}' in decision '{decision_id}'")]
    UnknownHitPolicy { decision_id: String, token: String },

    /// Unknown aggregation token
    #[error("Unknown aggregation '{token}' in decision '{decision_id}'")]
    UnknownAggregation { decision_id: String, token: String },

    /// Unknown type reference token
    #[error("Unknown type '{token}' for {location} in decision '{decision_id}'")]
    UnknownTypeRef {
        decision_id: String,
        location: String,
        token: String,
    },

    /// Structurally invalid decision table
    #[error("Invalid decision table in decision '{decision_id}': {message}")]
    InvalidTable { decision_id: String, message: String },

    /// Cell text that does not parse
    #[error("Invalid expression at {location} in decision '{decision_id}': {source}")]
    InvalidExpression {
        decision_id: String,
        location: String,
        #[source]
        source: ParseError,
    },
}

impl CompileError {
    /// Identifier of the decision the error belongs to, if any
    pub fn decision_id(&self) -> Option<&str> {
        match self {
            CompileError::NoDecision { .. } | CompileError::AmbiguousDecision { .. } => None,
            CompileError::DecisionNotFound { decision_id, .. }
            | CompileError::UnsupportedLogic { decision_id, .. }
            | CompileError::UnknownHitPolicy { decision_id, .. }
            | CompileError::UnknownAggregation { decision_id, .. }
            | CompileError::UnknownTypeRef { decision_id, .. }
            | CompileError::InvalidTable { decision_id, .. }
            | CompileError::InvalidExpression { decision_id, .. } => Some(decision_id),
        }
    }
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;
