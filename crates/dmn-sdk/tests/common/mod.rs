//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use dmn_sdk::{DmnEngine, DmnEngineBuilder, EvaluationContext, ModelSource, Value};
use std::path::PathBuf;

/// Path of a model fixture
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Model fixture as a path source
pub fn fixture_source(name: &str) -> ModelSource {
    ModelSource::path(fixture(name))
}

/// Engine with default configuration
pub fn engine() -> DmnEngine {
    DmnEngineBuilder::new()
        .build()
        .expect("default engine configuration is valid")
}

/// Build a context from name/value pairs
pub fn context<V: Into<Value> + Clone>(pairs: &[(&str, V)]) -> EvaluationContext {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone().into()))
        .collect()
}

/// Wrap a single decision table in a model document
pub fn table_model(hit_policy: &str, table_body: &str) -> String {
    let body: String = table_body
        .lines()
        .map(|line| format!("        {}\n", line))
        .collect();

    format!(
        "definitions:\n  id: inline\n  decisions:\n    - id: table\n      decision_table:\n        hit_policy: {}\n{}",
        hit_policy, body
    )
}
