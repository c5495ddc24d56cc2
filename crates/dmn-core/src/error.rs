//! Error types for DMN Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Type error: {0}")]
    TypeError(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Unknown token '{token}' for {kind}")]
    UnknownToken { kind: String, token: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
