//! DMN Compiler - decision resolution and decision table compilation
//!
//! This crate locates a decision inside a parsed model and compiles its
//! logic into an executable `CompiledDecision`.

pub mod codegen;
pub mod compiler;
pub mod error;
pub mod optimizer;
pub mod resolver;
pub mod validator;

// Re-export main types
pub use compiler::{Compiler, CompilerOptions};
pub use error::{CompileError, Result};
pub use resolver::DecisionResolver;

// Re-export codegen types
pub use codegen::{DecisionTableCompiler, ExpressionCompiler};

pub use optimizer::ConstantFolder;
pub use validator::TableValidator;
