//! Expression AST nodes

use super::operator::Operator;
use crate::types::Value;
use serde::{Deserialize, Serialize};

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Literal value
    Literal(Value),

    /// Field access (e.g., amount, customer.address.city)
    FieldAccess(Vec<String>),

    /// List literal whose items are expressions (e.g., [min_age, 18])
    List(Vec<Expression>),

    /// Binary operation
    Binary {
        left: Box<Expression>,
        op: Operator,
        right: Box<Expression>,
    },

    /// Unary operation
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// Function call
    FunctionCall { name: String, args: Vec<Expression> },
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    /// Logical NOT (!)
    Not,
    /// Arithmetic negation (-)
    Negate,
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: Value) -> Self {
        Expression::Literal(value)
    }

    /// Create a field access expression
    pub fn field_access(path: Vec<String>) -> Self {
        Expression::FieldAccess(path)
    }

    /// Create a binary expression
    pub fn binary(left: Expression, op: Operator, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Create a function call expression
    pub fn function_call(name: String, args: Vec<Expression>) -> Self {
        Expression::FunctionCall { name, args }
    }

    /// Create a unary expression
    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Returns the literal value if this expression is a constant.
    ///
    /// List literals whose items are all constants fold into an array value,
    /// and a negated number literal folds into a negative number.
    pub fn as_constant(&self) -> Option<Value> {
        match self {
            Expression::Literal(value) => Some(value.clone()),
            Expression::List(items) => items
                .iter()
                .map(Expression::as_constant)
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
            Expression::Unary {
                op: UnaryOperator::Negate,
                operand,
            } => match operand.as_constant() {
                Some(Value::Number(n)) => Some(Value::Number(-n)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Names of the root variables this expression reads
    pub fn referenced_variables(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables(&self, names: &mut Vec<String>) {
        match self {
            Expression::Literal(_) => {}
            Expression::FieldAccess(path) => {
                if let Some(root) = path.first() {
                    if !names.contains(root) {
                        names.push(root.clone());
                    }
                }
            }
            Expression::List(items) | Expression::FunctionCall { args: items, .. } => {
                for item in items {
                    item.collect_variables(names);
                }
            }
            Expression::Binary { left, right, .. } => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
            Expression::Unary { operand, .. } => operand.collect_variables(names),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_expression() {
        let expr = Expression::literal(Value::Number(42.0));
        assert_eq!(expr, Expression::Literal(Value::Number(42.0)));
    }

    #[test]
    fn test_binary_expression() {
        // customer.age > 18
        let expr = Expression::binary(
            Expression::field_access(vec!["customer".to_string(), "age".to_string()]),
            Operator::Gt,
            Expression::literal(Value::Number(18.0)),
        );

        match expr {
            Expression::Binary { left, op, right } => {
                assert_eq!(op, Operator::Gt);
                assert_eq!(
                    *left,
                    Expression::FieldAccess(vec!["customer".to_string(), "age".to_string()])
                );
                assert_eq!(*right, Expression::Literal(Value::Number(18.0)));
            }
            _ => panic!("Expected Binary expression"),
        }
    }

    #[test]
    fn test_as_constant() {
        assert_eq!(
            Expression::literal(Value::from("Stew")).as_constant(),
            Some(Value::from("Stew"))
        );
        assert_eq!(
            Expression::unary(UnaryOperator::Negate, Expression::literal(Value::Number(2.0)))
                .as_constant(),
            Some(Value::Number(-2.0))
        );
        assert_eq!(
            Expression::List(vec![
                Expression::literal(Value::Number(1.0)),
                Expression::literal(Value::Number(2.0)),
            ])
            .as_constant(),
            Some(Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]))
        );
        assert_eq!(
            Expression::field_access(vec!["season".to_string()]).as_constant(),
            None
        );
    }

    #[test]
    fn test_referenced_variables() {
        // max(amount, limit.value) + amount
        let expr = Expression::binary(
            Expression::function_call(
                "max".to_string(),
                vec![
                    Expression::field_access(vec!["amount".to_string()]),
                    Expression::field_access(vec!["limit".to_string(), "value".to_string()]),
                ],
            ),
            Operator::Add,
            Expression::field_access(vec!["amount".to_string()]),
        );

        assert_eq!(
            expr.referenced_variables(),
            vec!["amount".to_string(), "limit".to_string()]
        );
    }
}
