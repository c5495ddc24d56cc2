//! Type system for DMN
//!
//! This module contains the runtime type system including:
//! - Value types
//! - Type references declared on input and output clauses

pub mod type_ref;
pub mod value;

pub use type_ref::TypeRef;
pub use value::Value;
