//! Expression evaluation
//!
//! The `ExpressionEvaluator` trait is the seam between the table executor and
//! the expression language. `DefaultExpressionEvaluator` implements the
//! built-in language over the AST produced by the parser.

use crate::context::EvaluationContext;
use crate::engine::functions::call_function;
use crate::engine::operators::{execute_binary_op, execute_compare, execute_unary_op};
use crate::error::{EvalError, ExpressionError};
use dmn_core::ast::{Expression, Operator, UnaryTest, UnaryTests};
use dmn_core::ir::{CompiledExpression, InputEntry};
use dmn_core::Value;

/// Evaluates expressions and input entries against a context.
///
/// Implementations must be free of shared mutable state: one evaluator
/// serves many concurrent evaluations.
pub trait ExpressionEvaluator: Send + Sync {
    /// Evaluate an expression to a value
    fn evaluate(
        &self,
        expression: &CompiledExpression,
        context: &EvaluationContext,
    ) -> Result<Value, ExpressionError>;

    /// Test an input entry against the column subject.
    ///
    /// Don't-care entries never reach the evaluator.
    fn test(
        &self,
        entry: &InputEntry,
        subject: &Value,
        context: &EvaluationContext,
    ) -> Result<bool, ExpressionError>;
}

/// Evaluator for the built-in expression language
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultExpressionEvaluator;

impl DefaultExpressionEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate an expression AST
    pub fn eval(&self, expr: &Expression, context: &EvaluationContext) -> Result<Value, EvalError> {
        match expr {
            Expression::Literal(value) => Ok(value.clone()),

            Expression::FieldAccess(path) => context
                .load_field(path)
                .cloned()
                .ok_or_else(|| EvalError::UnknownVariable(path.join("."))),

            Expression::List(items) => items
                .iter()
                .map(|item| self.eval(item, context))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),

            Expression::Binary { left, op, right } => {
                let left = self.eval(left, context)?;

                // Short-circuit logical operators
                match (op, &left) {
                    (Operator::And, Value::Bool(false)) => return Ok(Value::Bool(false)),
                    (Operator::Or, Value::Bool(true)) => return Ok(Value::Bool(true)),
                    _ => {}
                }

                let right = self.eval(right, context)?;
                if op.is_comparison() {
                    execute_compare(&left, *op, &right).map(Value::Bool)
                } else {
                    execute_binary_op(&left, *op, &right)
                }
            }

            Expression::Unary { op, operand } => {
                let value = self.eval(operand, context)?;
                execute_unary_op(&value, *op)
            }

            Expression::FunctionCall { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg, context))
                    .collect::<Result<Vec<_>, _>>()?;
                call_function(name, &args)
            }
        }
    }

    /// Evaluate unary tests against a subject
    pub fn eval_tests(
        &self,
        tests: &UnaryTests,
        subject: &Value,
        context: &EvaluationContext,
    ) -> Result<bool, EvalError> {
        let mut matched = false;
        for test in &tests.tests {
            if self.eval_test(test, subject, context)? {
                matched = true;
                break;
            }
        }

        Ok(matched != tests.negated)
    }

    fn eval_test(
        &self,
        test: &UnaryTest,
        subject: &Value,
        context: &EvaluationContext,
    ) -> Result<bool, EvalError> {
        match test {
            UnaryTest::Equals(expr) => {
                let expected = self.eval(expr, context)?;
                execute_compare(subject, Operator::Eq, &expected)
            }
            UnaryTest::Compare { op, endpoint } => {
                let endpoint = self.eval(endpoint, context)?;
                execute_compare(subject, *op, &endpoint)
            }
            UnaryTest::Range {
                start,
                start_inclusive,
                end,
                end_inclusive,
            } => {
                let start = self.eval(start, context)?;
                let end = self.eval(end, context)?;
                let lower = if *start_inclusive { Operator::Ge } else { Operator::Gt };
                let upper = if *end_inclusive { Operator::Le } else { Operator::Lt };

                Ok(execute_compare(subject, lower, &start)? && execute_compare(subject, upper, &end)?)
            }
        }
    }
}

impl ExpressionEvaluator for DefaultExpressionEvaluator {
    fn evaluate(
        &self,
        expression: &CompiledExpression,
        context: &EvaluationContext,
    ) -> Result<Value, ExpressionError> {
        self.eval(&expression.expr, context)
            .map_err(|cause| expression_error(&expression.text, cause, context))
    }

    fn test(
        &self,
        entry: &InputEntry,
        subject: &Value,
        context: &EvaluationContext,
    ) -> Result<bool, ExpressionError> {
        match &entry.tests {
            None => Ok(true),
            Some(tests) => self
                .eval_tests(tests, subject, context)
                .map_err(|cause| expression_error(&entry.text, cause, context)),
        }
    }
}

fn expression_error(text: &str, cause: EvalError, context: &EvaluationContext) -> ExpressionError {
    ExpressionError {
        expression: text.to_string(),
        cause,
        context: context.snapshot(),
    }
}
