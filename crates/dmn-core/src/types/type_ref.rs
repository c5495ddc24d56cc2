//! Type references for input and output clauses
//!
//! A type reference names the type a clause's values are coerced into before
//! they are tested or returned.

use crate::error::{CoreError, Result};
use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Declared type of an input or output clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeRef {
    /// String type
    String,
    /// Number type (int or float)
    Number,
    /// Integral number
    Integer,
    /// Floating point number
    Double,
    /// Boolean type
    Boolean,
    /// Any type (no coercion)
    #[default]
    Any,
}

impl TypeRef {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeRef::String => "string",
            TypeRef::Number => "number",
            TypeRef::Integer => "integer",
            TypeRef::Double => "double",
            TypeRef::Boolean => "boolean",
            TypeRef::Any => "any",
        }
    }

    /// Coerce a value into this type.
    ///
    /// `Null` passes every type unchanged.
    pub fn coerce(&self, value: Value) -> Result<Value> {
        if value.is_null() {
            return Ok(value);
        }

        match (self, value) {
            (TypeRef::Any, value) => Ok(value),

            (TypeRef::String, Value::String(s)) => Ok(Value::String(s)),
            (TypeRef::String, v @ (Value::Number(_) | Value::Bool(_))) => {
                Ok(Value::String(v.to_string()))
            }

            (TypeRef::Number | TypeRef::Double, Value::Number(n)) => Ok(Value::Number(n)),
            (TypeRef::Number | TypeRef::Double, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(Value::Number)
                .map_err(|_| self.mismatch(&Value::String(s))),

            (TypeRef::Integer, Value::Number(n)) if n.fract() == 0.0 => Ok(Value::Number(n)),
            (TypeRef::Integer, Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(|n| Value::Number(n as f64))
                .map_err(|_| self.mismatch(&Value::String(s))),

            (TypeRef::Boolean, Value::Bool(b)) => Ok(Value::Bool(b)),
            (TypeRef::Boolean, Value::String(s)) => match s.trim() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(self.mismatch(&Value::String(s))),
            },

            (_, value) => Err(self.mismatch(&value)),
        }
    }

    fn mismatch(&self, value: &Value) -> CoreError {
        CoreError::TypeError(format!(
            "cannot convert {} value '{}' to type '{}'",
            value.type_name(),
            value,
            self.as_str()
        ))
    }
}

impl FromStr for TypeRef {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" => Ok(TypeRef::String),
            "number" => Ok(TypeRef::Number),
            "integer" | "int" | "long" => Ok(TypeRef::Integer),
            "double" => Ok(TypeRef::Double),
            "boolean" | "bool" => Ok(TypeRef::Boolean),
            "any" | "" => Ok(TypeRef::Any),
            _ => Err(CoreError::UnknownToken {
                kind: "type reference".to_string(),
                token: s.to_string(),
            }),
        }
    }
}
