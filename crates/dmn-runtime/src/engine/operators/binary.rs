//! Binary operator execution

use crate::error::EvalError;
use dmn_core::ast::Operator;
use dmn_core::Value;

/// Execute an arithmetic, logical, string or membership operation.
///
/// Comparisons are handled by `execute_compare`.
pub(crate) fn execute_binary_op(left: &Value, op: Operator, right: &Value) -> Result<Value, EvalError> {
    // Null in any operation returns Null so missing fields propagate
    if left.is_null() || right.is_null() {
        tracing::trace!(
            "Null in binary operation: {} {} {}, returning null",
            left,
            op.symbol(),
            right
        );
        return Ok(Value::Null);
    }

    match (left, op, right) {
        // Arithmetic operations
        (Value::Number(l), Operator::Add, Value::Number(r)) => Ok(Value::Number(l + r)),
        (Value::Number(l), Operator::Sub, Value::Number(r)) => Ok(Value::Number(l - r)),
        (Value::Number(l), Operator::Mul, Value::Number(r)) => Ok(Value::Number(l * r)),
        (Value::Number(l), Operator::Div, Value::Number(r)) => {
            if *r == 0.0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(Value::Number(l / r))
            }
        }
        (Value::Number(l), Operator::Mod, Value::Number(r)) => {
            if *r == 0.0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(Value::Number(l % r))
            }
        }

        // String concatenation
        (Value::String(l), Operator::Add, Value::String(r)) => Ok(Value::String(format!("{}{}", l, r))),

        // Logical operations
        (Value::Bool(l), Operator::And, Value::Bool(r)) => Ok(Value::Bool(*l && *r)),
        (Value::Bool(l), Operator::Or, Value::Bool(r)) => Ok(Value::Bool(*l || *r)),

        // String operations
        (Value::String(l), Operator::Contains, Value::String(r)) => Ok(Value::Bool(l.contains(r.as_str()))),
        (Value::String(l), Operator::StartsWith, Value::String(r)) => {
            Ok(Value::Bool(l.starts_with(r.as_str())))
        }
        (Value::String(l), Operator::EndsWith, Value::String(r)) => {
            Ok(Value::Bool(l.ends_with(r.as_str())))
        }

        // Array operations
        (Value::Array(arr), Operator::Contains, val) => Ok(Value::Bool(arr.contains(val))),

        // In operator
        (val, Operator::In, Value::Array(arr)) => Ok(Value::Bool(arr.contains(val))),
        (val, Operator::NotIn, Value::Array(arr)) => Ok(Value::Bool(!arr.contains(val))),

        _ => Err(EvalError::TypeError(format!(
            "cannot apply '{}' to {} and {}",
            op.symbol(),
            left.type_name(),
            right.type_name()
        ))),
    }
}
