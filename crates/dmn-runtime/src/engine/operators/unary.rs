//! Unary operator execution

use crate::error::EvalError;
use dmn_core::ast::UnaryOperator;
use dmn_core::Value;

/// Execute a unary operation
pub(crate) fn execute_unary_op(operand: &Value, op: UnaryOperator) -> Result<Value, EvalError> {
    match (op, operand) {
        (_, Value::Null) => Ok(Value::Null),
        (UnaryOperator::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOperator::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOperator::Not, _) => Err(EvalError::TypeError(format!(
            "cannot negate {} value",
            operand.type_name()
        ))),
        (UnaryOperator::Negate, _) => Err(EvalError::TypeError(format!(
            "cannot apply unary minus to {} value",
            operand.type_name()
        ))),
    }
}
