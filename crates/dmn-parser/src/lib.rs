//! DMN Parser - YAML to AST parser for the DMN decision engine
//!
//! This crate turns model documents into `DecisionModel` handles and parses
//! the expression and unary-test texts found in decision table cells.

pub mod error;
pub mod expression_parser;
pub mod model_parser;
pub mod unary_tests_parser;
pub mod yaml_parser;

// Re-export main parser types
pub use error::{ParseError, Result};
pub use expression_parser::ExpressionParser;
pub use model_parser::{ModelParser, ParserOptions};
pub use unary_tests_parser::UnaryTestsParser;
pub use yaml_parser::YamlParser;
