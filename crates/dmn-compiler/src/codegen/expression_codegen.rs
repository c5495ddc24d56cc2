//! Expression compiler
//!
//! Compiles cell texts into parsed, optionally constant-folded expressions
//! and unary tests.

use crate::optimizer::ConstantFolder;
use dmn_core::ast::{UnaryTest, UnaryTests};
use dmn_core::ir::{CompiledExpression, InputEntry};
use dmn_core::Value;
use dmn_parser::{ExpressionParser, Result, UnaryTestsParser};

/// Expression compiler
pub struct ExpressionCompiler {
    folder: Option<ConstantFolder>,
}

impl ExpressionCompiler {
    /// Create an expression compiler
    pub fn new(fold_constants: bool) -> Self {
        Self {
            folder: fold_constants.then(ConstantFolder::new),
        }
    }

    /// Compile an expression text (input expression, output value)
    pub fn compile_expression(&self, text: &str) -> Result<CompiledExpression> {
        let expr = ExpressionParser::parse(text)?;
        let expr = match &self.folder {
            Some(folder) => folder.fold(&expr),
            None => expr,
        };
        Ok(CompiledExpression::new(text.trim(), expr))
    }

    /// Compile an output entry; an empty entry produces `null`
    pub fn compile_output_entry(&self, text: &str) -> Result<CompiledExpression> {
        if text.trim().is_empty() {
            return Ok(CompiledExpression::new(
                "",
                dmn_core::ast::Expression::literal(Value::Null),
            ));
        }
        self.compile_expression(text)
    }

    /// Compile an input entry into unary tests
    pub fn compile_input_entry(&self, text: &str) -> Result<InputEntry> {
        let tests = UnaryTestsParser::parse(text)?.map(|tests| self.fold_tests(tests));
        Ok(InputEntry {
            text: text.trim().to_string(),
            tests,
        })
    }

    fn fold_tests(&self, tests: UnaryTests) -> UnaryTests {
        let Some(folder) = &self.folder else {
            return tests;
        };

        UnaryTests {
            negated: tests.negated,
            tests: tests
                .tests
                .into_iter()
                .map(|test| match test {
                    UnaryTest::Equals(expr) => UnaryTest::Equals(folder.fold(&expr)),
                    UnaryTest::Compare { op, endpoint } => UnaryTest::Compare {
                        op,
                        endpoint: folder.fold(&endpoint),
                    },
                    UnaryTest::Range {
                        start,
                        start_inclusive,
                        end,
                        end_inclusive,
                    } => UnaryTest::Range {
                        start: folder.fold(&start),
                        start_inclusive,
                        end: folder.fold(&end),
                        end_inclusive,
                    },
                })
                .collect(),
        }
    }
}

impl Default for ExpressionCompiler {
    fn default() -> Self {
        Self::new(true)
    }
}
