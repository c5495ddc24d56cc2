//! DMN Core - Core types and definitions for the DMN decision engine
//!
//! This crate provides the fundamental types used across the engine:
//! - Value types and type references for runtime data
//! - AST definitions for decision models, expressions and unary tests
//! - IR definitions for compiled decisions
//! - Error types

pub mod ast;
pub mod error;
pub mod ir;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use types::{TypeRef, Value};
