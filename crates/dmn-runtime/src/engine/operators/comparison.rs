//! Comparison operator execution

use crate::error::EvalError;
use dmn_core::ast::Operator;
use dmn_core::Value;
use std::cmp::Ordering;

/// Execute a comparison operation.
///
/// A null operand makes every comparison false, except that `==` holds for
/// two nulls and `!=` holds when exactly one side is null. Operands of
/// different types cannot be compared.
pub(crate) fn execute_compare(left: &Value, op: Operator, right: &Value) -> Result<bool, EvalError> {
    if left.is_null() || right.is_null() {
        let both = left.is_null() && right.is_null();
        return Ok(match op {
            Operator::Eq => both,
            Operator::Ne => !both,
            _ => false,
        });
    }

    let ordering = match (left, right) {
        (Value::Number(l), Value::Number(r)) => l.partial_cmp(r),
        (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
        (Value::Bool(l), Value::Bool(r)) if matches!(op, Operator::Eq | Operator::Ne) => {
            Some(l.cmp(r))
        }
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_))
            if matches!(op, Operator::Eq | Operator::Ne) =>
        {
            return Ok((left == right) == (op == Operator::Eq));
        }
        _ => {
            return Err(EvalError::TypeError(format!(
                "cannot compare {} and {} with '{}'",
                left.type_name(),
                right.type_name(),
                op.symbol()
            )))
        }
    };

    // NaN compares unequal to everything
    let Some(ordering) = ordering else {
        return Ok(op == Operator::Ne);
    };

    match op {
        Operator::Eq => Ok(ordering == Ordering::Equal),
        Operator::Ne => Ok(ordering != Ordering::Equal),
        Operator::Gt => Ok(ordering == Ordering::Greater),
        Operator::Ge => Ok(ordering != Ordering::Less),
        Operator::Lt => Ok(ordering == Ordering::Less),
        Operator::Le => Ok(ordering != Ordering::Greater),
        _ => Err(EvalError::TypeError(format!(
            "'{}' is not a comparison",
            op.symbol()
        ))),
    }
}
