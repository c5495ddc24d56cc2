//! Unary tests parser
//!
//! Parses the text of an input entry cell into `UnaryTests`.
//!
//! Supported syntax:
//! - Don't care: empty cell or `-`
//! - Equality: `"Winter"`, `42`, `season`
//! - Comparison: `< 10`, `<= 10`, `> 10`, `>= 10`, `!= "Fall"`, `= 5`
//! - Ranges: `[1..10]`, `(1..10)`, `]1..10[`, `[1..10[`
//! - Disjunction: `"Winter", "Spring"`
//! - Negation: `not("Winter", "Spring")`

use crate::error::{ParseError, Result};
use crate::expression_parser::ExpressionParser;
use dmn_core::ast::{Operator, UnaryTest, UnaryTests};

/// Unary tests parser
pub struct UnaryTestsParser;

const COMPARISON_PREFIXES: &[(&str, Operator)] = &[
    ("<=", Operator::Le),
    (">=", Operator::Ge),
    ("!=", Operator::Ne),
    ("==", Operator::Eq),
    ("<", Operator::Lt),
    (">", Operator::Gt),
    ("=", Operator::Eq),
];

impl UnaryTestsParser {
    /// Parse an input entry.
    ///
    /// Returns `None` for a "don't care" entry, which matches every subject.
    pub fn parse(input: &str) -> Result<Option<UnaryTests>> {
        let text = input.trim();

        if text.is_empty() || text == "-" {
            return Ok(None);
        }

        if let Some(inner) = Self::strip_not(text) {
            let tests = Self::parse_disjunction(inner, text)?;
            return Ok(Some(UnaryTests::any_of(tests).negate()));
        }

        let tests = Self::parse_disjunction(text, text)?;
        Ok(Some(UnaryTests::any_of(tests)))
    }

    fn parse_disjunction(input: &str, whole: &str) -> Result<Vec<UnaryTest>> {
        let parts = Self::split_tests(input);

        if parts.is_empty() || parts.iter().any(|part| part.is_empty()) {
            return Err(ParseError::InvalidUnaryTest {
                text: whole.to_string(),
                message: "empty test in list".to_string(),
            });
        }

        parts
            .into_iter()
            .map(|part| Self::parse_test(part, whole))
            .collect()
    }

    fn parse_test(input: &str, whole: &str) -> Result<UnaryTest> {
        let invalid = |e: ParseError| ParseError::InvalidUnaryTest {
            text: whole.to_string(),
            message: e.to_string(),
        };

        for (prefix, op) in COMPARISON_PREFIXES {
            if let Some(rest) = input.strip_prefix(prefix) {
                let endpoint = ExpressionParser::parse(rest).map_err(invalid)?;
                return Ok(match op {
                    Operator::Eq => UnaryTest::equals(endpoint),
                    _ => UnaryTest::compare(*op, endpoint),
                });
            }
        }

        if let Some((start, start_inclusive, end, end_inclusive)) = Self::split_range(input) {
            return Ok(UnaryTest::Range {
                start: ExpressionParser::parse(start).map_err(invalid)?,
                start_inclusive,
                end: ExpressionParser::parse(end).map_err(invalid)?,
                end_inclusive,
            });
        }

        Ok(UnaryTest::equals(ExpressionParser::parse(input).map_err(invalid)?))
    }

    /// Strip a `not( ... )` wrapper
    fn strip_not(text: &str) -> Option<&str> {
        text.strip_prefix("not")?
            .trim_start()
            .strip_prefix('(')?
            .strip_suffix(')')
    }

    /// Split an interval into its endpoints and inclusiveness flags
    fn split_range(input: &str) -> Option<(&str, bool, &str, bool)> {
        let first = input.chars().next()?;
        let last = input.chars().last()?;

        if input.len() < 2 || !matches!(first, '[' | '(' | ']') || !matches!(last, ']' | '[' | ')') {
            return None;
        }

        let inner = &input[1..input.len() - 1];
        let dots = Self::find_outside_strings(inner, "..")?;

        Some((
            inner[..dots].trim(),
            first == '[',
            inner[dots + 2..].trim(),
            last == ']',
        ))
    }

    fn find_outside_strings(input: &str, needle: &str) -> Option<usize> {
        let bytes = input.as_bytes();
        let mut in_string = false;
        let mut escaped = false;

        for i in 0..bytes.len() {
            let b = bytes[i];
            if in_string {
                if escaped {
                    escaped = false;
                } else if b == b'\\' {
                    escaped = true;
                } else if b == b'"' {
                    in_string = false;
                }
                continue;
            }

            if b == b'"' {
                in_string = true;
            } else if bytes[i..].starts_with(needle.as_bytes()) {
                return Some(i);
            }
        }

        None
    }

    /// Split a disjunction on top-level commas.
    ///
    /// A `]` opening a segment starts an interval, and a `[` directly before
    /// a separator or the end closes one.
    fn split_tests(input: &str) -> Vec<&str> {
        let bytes = input.as_bytes();
        let mut parts = Vec::new();
        let mut depth: i32 = 0;
        let mut in_string = false;
        let mut escaped = false;
        let mut segment_start = true;
        let mut start = 0;

        for i in 0..bytes.len() {
            let b = bytes[i];

            if in_string {
                if escaped {
                    escaped = false;
                } else if b == b'\\' {
                    escaped = true;
                } else if b == b'"' {
                    in_string = false;
                }
                continue;
            }

            if segment_start && b.is_ascii_whitespace() {
                continue;
            }
            let at_start = segment_start;
            segment_start = false;

            match b {
                b'"' => in_string = true,
                b'(' => depth += 1,
                b')' => depth -= 1,
                b']' if at_start => depth += 1,
                b']' => depth -= 1,
                b'[' if !at_start && depth == 1 && Self::closes_segment(&bytes[i + 1..]) => {
                    depth -= 1
                }
                b'[' => depth += 1,
                b',' if depth == 0 => {
                    parts.push(input[start..i].trim());
                    start = i + 1;
                    segment_start = true;
                }
                _ => {}
            }
        }

        let tail = input[start..].trim();
        if !tail.is_empty() || !parts.is_empty() {
            parts.push(tail);
        }

        parts
    }

    fn closes_segment(rest: &[u8]) -> bool {
        rest.iter()
            .find(|b| !b.is_ascii_whitespace())
            .map_or(true, |&b| b == b',')
    }
}
