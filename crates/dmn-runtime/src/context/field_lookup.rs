//! Field Lookup Utilities
//!
//! Helpers for navigating nested values using dot-notation paths.

use dmn_core::Value;
use std::collections::HashMap;

/// Outcome of resolving a path against the context variables
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FieldLookup<'a> {
    /// The root variable is not bound
    UnknownRoot,
    /// The value at the path; missing nested keys resolve to `Null`
    Found(&'a Value),
}

const NULL: Value = Value::Null;

/// Get nested value from the variables following a path
///
/// Only the first segment must exist. Below it, a missing key or a
/// non-object parent resolves to `Null`.
pub(super) fn get_nested_value<'a>(
    data: &'a HashMap<String, Value>,
    path: &[String],
) -> FieldLookup<'a> {
    let Some((root, rest)) = path.split_first() else {
        return FieldLookup::UnknownRoot;
    };

    match data.get(root) {
        Some(value) => FieldLookup::Found(navigate_path(value, rest)),
        None => FieldLookup::UnknownRoot,
    }
}

/// Navigate through a path in a value, returning `Null` if any part is not found
pub(super) fn navigate_path<'a>(value: &'a Value, path: &[String]) -> &'a Value {
    let mut current = value;

    for key in path {
        match current.get(key) {
            Some(next) => current = next,
            None => {
                tracing::trace!("Field '{}' not found, resolving to null", key);
                return &NULL;
            }
        }
    }

    current
}
