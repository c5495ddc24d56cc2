//! Optimization module
//!
//! This module provides optimizations applied to compiled cell expressions.

pub mod constant_folding;

// Re-export for convenience
pub use constant_folding::ConstantFolder;
