//! Constant folding optimizer
//!
//! Evaluates constant sub-expressions of cells at compile time. Only
//! operations whose runtime result cannot fail are folded, so a folded
//! expression always evaluates to the same value as the original.

use dmn_core::ast::{Expression, Operator, UnaryOperator};
use dmn_core::Value;

/// Constant folding optimizer
pub struct ConstantFolder;

impl ConstantFolder {
    /// Create a new constant folder
    pub fn new() -> Self {
        Self
    }

    /// Optimize an expression by folding constants
    pub fn fold(&self, expr: &Expression) -> Expression {
        match expr {
            Expression::Literal(_) | Expression::FieldAccess(_) => expr.clone(),

            Expression::List(items) => {
                Expression::List(items.iter().map(|item| self.fold(item)).collect())
            }

            Expression::Binary { left, op, right } => {
                let left_folded = self.fold(left);
                let right_folded = self.fold(right);

                // Try to fold if both operands are literals
                if let (Expression::Literal(left_val), Expression::Literal(right_val)) =
                    (&left_folded, &right_folded)
                {
                    if let Some(result) = self.fold_binary_op(left_val, op, right_val) {
                        return Expression::Literal(result);
                    }
                }

                Expression::binary(left_folded, *op, right_folded)
            }

            Expression::Unary { op, operand } => {
                let operand_folded = self.fold(operand);

                if let Expression::Literal(val) = &operand_folded {
                    if let Some(result) = self.fold_unary_op(op, val) {
                        return Expression::Literal(result);
                    }
                }

                Expression::unary(*op, operand_folded)
            }

            Expression::FunctionCall { name, args } => {
                // Functions are resolved by the evaluator, only arguments are folded
                Expression::function_call(
                    name.clone(),
                    args.iter().map(|arg| self.fold(arg)).collect(),
                )
            }
        }
    }

    /// Fold a binary operation on two constant values
    fn fold_binary_op(&self, left: &Value, op: &Operator, right: &Value) -> Option<Value> {
        match (left, op, right) {
            // Arithmetic operations on numbers
            (Value::Number(l), Operator::Add, Value::Number(r)) => Some(Value::Number(l + r)),
            (Value::Number(l), Operator::Sub, Value::Number(r)) => Some(Value::Number(l - r)),
            (Value::Number(l), Operator::Mul, Value::Number(r)) => Some(Value::Number(l * r)),
            (Value::Number(l), Operator::Div, Value::Number(r)) if *r != 0.0 => {
                Some(Value::Number(l / r))
            }
            (Value::Number(l), Operator::Mod, Value::Number(r)) if *r != 0.0 => {
                Some(Value::Number(l % r))
            }

            // String concatenation
            (Value::String(l), Operator::Add, Value::String(r)) => {
                Some(Value::String(format!("{}{}", l, r)))
            }

            // Comparison operations on numbers
            (Value::Number(l), Operator::Gt, Value::Number(r)) => Some(Value::Bool(l > r)),
            (Value::Number(l), Operator::Ge, Value::Number(r)) => Some(Value::Bool(l >= r)),
            (Value::Number(l), Operator::Lt, Value::Number(r)) => Some(Value::Bool(l < r)),
            (Value::Number(l), Operator::Le, Value::Number(r)) => Some(Value::Bool(l <= r)),

            // Equality on same-typed scalars
            (Value::Number(l), Operator::Eq, Value::Number(r)) => Some(Value::Bool(l == r)),
            (Value::Number(l), Operator::Ne, Value::Number(r)) => Some(Value::Bool(l != r)),
            (Value::String(l), Operator::Eq, Value::String(r)) => Some(Value::Bool(l == r)),
            (Value::String(l), Operator::Ne, Value::String(r)) => Some(Value::Bool(l != r)),
            (Value::Bool(l), Operator::Eq, Value::Bool(r)) => Some(Value::Bool(l == r)),
            (Value::Bool(l), Operator::Ne, Value::Bool(r)) => Some(Value::Bool(l != r)),

            // Logical operations on booleans
            (Value::Bool(l), Operator::And, Value::Bool(r)) => Some(Value::Bool(*l && *r)),
            (Value::Bool(l), Operator::Or, Value::Bool(r)) => Some(Value::Bool(*l || *r)),

            // String operations
            (Value::String(l), Operator::Contains, Value::String(r)) => {
                Some(Value::Bool(l.contains(r.as_str())))
            }
            (Value::String(l), Operator::StartsWith, Value::String(r)) => {
                Some(Value::Bool(l.starts_with(r.as_str())))
            }
            (Value::String(l), Operator::EndsWith, Value::String(r)) => {
                Some(Value::Bool(l.ends_with(r.as_str())))
            }

            // Can't fold
            _ => None,
        }
    }

    /// Fold a unary operation on a constant value
    fn fold_unary_op(&self, op: &UnaryOperator, operand: &Value) -> Option<Value> {
        match (op, operand) {
            (UnaryOperator::Not, Value::Bool(b)) => Some(Value::Bool(!b)),
            (UnaryOperator::Negate, Value::Number(n)) => Some(Value::Number(-n)),
            _ => None,
        }
    }
}

impl Default for ConstantFolder {
    fn default() -> Self {
        Self::new()
    }
}
