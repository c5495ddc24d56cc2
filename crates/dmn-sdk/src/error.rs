//! SDK error types

use dmn_compiler::CompileError;
use dmn_runtime::RuntimeError;
use std::fmt;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Parser error
    #[error("Parser error in '{source_label}': {source}")]
    ParseError {
        source_label: String,
        #[source]
        source: dmn_parser::ParseError,
    },

    /// Compiler error
    #[error("Compiler error: {0}")]
    CompileError(#[from] CompileError),

    /// Runtime error
    #[error("Runtime error: {0}")]
    RuntimeError(#[from] RuntimeError),

    /// Model source could not be read
    #[error("Failed to read model source '{source_label}': {source}")]
    SourceError {
        source_label: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Error kind, independent of the pipeline stage that raised the error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Model document is malformed
    Parse,
    /// Model source could not be read
    Io,
    /// Requested decision is absent, or the model declares none
    NotFound,
    /// Model declares several decisions and no id was given
    Ambiguous,
    /// Decision logic variant is not implemented
    UnsupportedLogic,
    /// Decision table is structurally invalid
    Compile,
    /// Hit policy requiring a unique or agreeing match was violated
    RuleConflict,
    /// Expression evaluation failed
    Expression,
    /// Value does not match a declared type or aggregation
    Type,
    /// A single output was requested from a result with several
    NotUnique,
    /// Invalid engine configuration
    Config,
}

impl SdkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SdkError::ConfigError(_) => ErrorKind::Config,
            SdkError::ParseError { .. } => ErrorKind::Parse,
            SdkError::SourceError { .. } | SdkError::IoError(_) => ErrorKind::Io,
            SdkError::CompileError(e) => match e {
                CompileError::NoDecision { .. } | CompileError::DecisionNotFound { .. } => {
                    ErrorKind::NotFound
                }
                CompileError::AmbiguousDecision { .. } => ErrorKind::Ambiguous,
                CompileError::UnsupportedLogic { .. } => ErrorKind::UnsupportedLogic,
                CompileError::UnknownHitPolicy { .. }
                | CompileError::UnknownAggregation { .. }
                | CompileError::UnknownTypeRef { .. }
                | CompileError::InvalidTable { .. }
                | CompileError::InvalidExpression { .. } => ErrorKind::Compile,
            },
            SdkError::RuntimeError(e) => match e {
                RuntimeError::RuleConflict { .. } => ErrorKind::RuleConflict,
                RuntimeError::Expression { .. } => ErrorKind::Expression,
                RuntimeError::TypeError { .. } => ErrorKind::Type,
                RuntimeError::NotUnique(_) => ErrorKind::NotUnique,
            },
        }
    }

    /// Identifier of the decision the error belongs to, if any
    pub fn decision_id(&self) -> Option<&str> {
        match self {
            SdkError::CompileError(e) => e.decision_id(),
            SdkError::RuntimeError(
                RuntimeError::RuleConflict { decision_id, .. }
                | RuntimeError::Expression { decision_id, .. }
                | RuntimeError::TypeError { decision_id, .. },
            ) => Some(decision_id),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;
    use dmn_core::ast::LogicKind;

    #[test]
    fn test_config_error() {
        let error = SdkError::ConfigError("cache_capacity must be positive".to_string());
        assert_eq!(error.kind(), ErrorKind::Config);
        assert!(error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_not_found_kinds() {
        let error: SdkError = CompileError::NoDecision {
            source_label: "NoDecision.dmn".to_string(),
        }
        .into();
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert!(error.to_string().contains("Unable to find decision"));
        assert!(error.to_string().contains("NoDecision.dmn"));

        let error: SdkError = CompileError::AmbiguousDecision {
            source_label: "two.dmn".to_string(),
            count: 2,
        }
        .into();
        assert_eq!(error.kind(), ErrorKind::Ambiguous);
    }

    #[test]
    fn test_unsupported_logic_kind() {
        let error: SdkError = CompileError::UnsupportedLogic {
            decision_id: "decision".to_string(),
            kind: LogicKind::Invocation,
        }
        .into();
        assert_eq!(error.kind(), ErrorKind::UnsupportedLogic);
        assert_eq!(error.decision_id(), Some("decision"));
    }

    #[test]
    fn test_runtime_kinds() {
        let error: SdkError = RuntimeError::NotUnique(3).into();
        assert_eq!(error.kind(), ErrorKind::NotUnique);
        assert_eq!(error.decision_id(), None);

        let error: SdkError = RuntimeError::TypeError {
            decision_id: "dish".to_string(),
            location: "input 'season'".to_string(),
            message: "bad".to_string(),
        }
        .into();
        assert_eq!(error.kind(), ErrorKind::Type);
        assert_eq!(error.decision_id(), Some("dish"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let sdk_error: SdkError = io_error.into();
        assert_eq!(sdk_error.kind(), ErrorKind::Io);
        assert!(sdk_error.to_string().contains("File not found"));
    }
}
