//! Expression parser
//!
//! Parses string expressions into Expression AST nodes.
//!
//! Supported syntax:
//! - Field access: `season`, `customer.address.city`
//! - Literals: `42`, `3.14`, `"string"`, `true`, `false`, `null`
//! - List literals: `[1, 2, 3]`, `["Winter", season]`
//! - Binary operators: `>`, `<`, `>=`, `<=`, `==`, `=`, `!=`, `+`, `-`, `*`, `/`, `%`,
//!   `&&`, `||`, `and`, `or`
//! - Keyword operators: `in`, `not_in`, `contains`, `starts_with`, `ends_with`
//! - Unary operators: `!`, `-`
//! - Function calls: `max(a, b)`, `upper(name)`
//! - Parentheses for grouping: `(a + b) * c`
//!
//! Operators inside string literals are never split on.

use crate::error::{ParseError, Result};
use dmn_core::ast::{Expression, Operator, UnaryOperator};
use dmn_core::Value;

/// Expression parser
pub struct ExpressionParser;

impl ExpressionParser {
    /// Parse an expression from a string
    pub fn parse(input: &str) -> Result<Expression> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ParseError::InvalidExpression("Empty expression".to_string()));
        }

        Self::check_balanced(input)?;
        Self::parse_expression(input)
    }

    /// Parse a complete expression (handles binary operators with precedence)
    fn parse_expression(input: &str) -> Result<Expression> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseError::InvalidExpression("Missing operand".to_string()));
        }

        // Logical operators (lowest precedence)
        let split = Self::split_by_operator(input, &["||"])
            .or_else(|| Self::split_by_keyword_operator(input, &["or"]));
        if let Some((left, op, right)) = split {
            return Self::binary(left, op, right);
        }

        let split = Self::split_by_operator(input, &["&&"])
            .or_else(|| Self::split_by_keyword_operator(input, &["and"]));
        if let Some((left, op, right)) = split {
            return Self::binary(left, op, right);
        }

        // Keyword operators (contains, in, not_in, etc.)
        if let Some((left, op, right)) = Self::split_by_keyword_operator(
            input,
            &["contains", "not_in", "in", "starts_with", "ends_with"],
        ) {
            return Self::binary(left, op, right);
        }

        // Comparison operators
        if let Some((left, op, right)) =
            Self::split_by_operator(input, &["==", "!=", "<=", ">=", "<", ">", "="])
        {
            return Self::binary(left, op, right);
        }

        // Additive operators
        if let Some((left, op, right)) = Self::split_by_operator(input, &["+", "-"]) {
            return Self::binary(left, op, right);
        }

        // Multiplicative operators
        if let Some((left, op, right)) = Self::split_by_operator(input, &["*", "/", "%"]) {
            return Self::binary(left, op, right);
        }

        // Literals, field access, function calls, parentheses
        Self::parse_primary(input)
    }

    fn binary(left: &str, op: &str, right: &str) -> Result<Expression> {
        let op = Self::parse_operator(op)?;
        Ok(Expression::binary(
            Self::parse_expression(left)?,
            op,
            Self::parse_expression(right)?,
        ))
    }

    /// Parse a primary expression
    fn parse_primary(input: &str) -> Result<Expression> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ParseError::InvalidExpression("Missing operand".to_string()));
        }

        // Unary operators
        if let Some(rest) = input.strip_prefix('!') {
            return Ok(Expression::unary(UnaryOperator::Not, Self::parse_primary(rest)?));
        }

        if let Some(rest) = input.strip_prefix('-') {
            if !rest.trim_start().starts_with(|c: char| c.is_ascii_digit() || c == '.') {
                return Ok(Expression::unary(UnaryOperator::Negate, Self::parse_primary(rest)?));
            }
        }

        // Parentheses
        if Self::wraps(input, b'(', b')') {
            return Self::parse_expression(&input[1..input.len() - 1]);
        }

        // List literals
        if Self::wraps(input, b'[', b']') {
            let items = Self::split_top_level(&input[1..input.len() - 1], ',')
                .into_iter()
                .map(Self::parse_expression)
                .collect::<Result<Vec<_>>>()?;
            return Ok(Expression::List(items));
        }

        // String literals
        if let Some(s) = Self::parse_string_literal(input) {
            return Ok(Expression::literal(Value::String(s)));
        }

        match input {
            "true" => return Ok(Expression::literal(Value::Bool(true))),
            "false" => return Ok(Expression::literal(Value::Bool(false))),
            "null" => return Ok(Expression::literal(Value::Null)),
            _ => {}
        }

        // Number literals
        if input
            .trim_start_matches('-')
            .starts_with(|c: char| c.is_ascii_digit() || c == '.')
        {
            return input
                .parse::<f64>()
                .map(|n| Expression::literal(Value::Number(n)))
                .map_err(|_| ParseError::InvalidExpression(format!("Invalid number: {}", input)));
        }

        // Function calls
        if let Some(paren_pos) = input.find('(') {
            let func_name = input[..paren_pos].trim();
            if Self::is_identifier(func_name) && Self::wraps(&input[paren_pos..], b'(', b')') {
                let args = Self::split_top_level(&input[paren_pos + 1..input.len() - 1], ',')
                    .into_iter()
                    .map(Self::parse_expression)
                    .collect::<Result<Vec<_>>>()?;

                return Ok(Expression::function_call(func_name.to_string(), args));
            }
        }

        // Field access (single identifier or dotted path)
        let parts: Vec<&str> = input.split('.').map(str::trim).collect();
        if parts.iter().all(|part| Self::is_identifier(part)) {
            return Ok(Expression::field_access(
                parts.into_iter().map(str::to_string).collect(),
            ));
        }

        Err(ParseError::InvalidExpression(format!("Cannot parse: {}", input)))
    }

    /// Split input by binary operator, scanning right to left for left associativity
    fn split_by_operator<'a>(
        input: &'a str,
        operators: &[&str],
    ) -> Option<(&'a str, &'a str, &'a str)> {
        let mask = Self::top_level_mask(input);
        let bytes = input.as_bytes();

        for i in (0..input.len()).rev() {
            if !mask[i] {
                continue;
            }

            for &op in operators {
                let end = i + op.len();
                if end > input.len() || &bytes[i..end] != op.as_bytes() {
                    continue;
                }

                // Make sure it's not part of another operator
                let is_valid = (i == 0 || !Self::is_operator_char(bytes[i - 1] as char))
                    && (end >= input.len() || !Self::is_operator_char(bytes[end] as char));
                if !is_valid {
                    continue;
                }

                let left = input[..i].trim();
                if (op == "+" || op == "-") && !Self::ends_with_operand(left) {
                    continue;
                }

                return Some((left, &input[i..end], input[end..].trim()));
            }
        }

        None
    }

    /// Split input by keyword operator (respecting brackets, strings and word boundaries)
    fn split_by_keyword_operator<'a>(
        input: &'a str,
        operators: &[&str],
    ) -> Option<(&'a str, &'a str, &'a str)> {
        let mask = Self::top_level_mask(input);
        let bytes = input.as_bytes();

        for i in (0..input.len()).rev() {
            if !mask[i] {
                continue;
            }

            for &op in operators {
                let end = i + op.len();
                if end > input.len() || &bytes[i..end] != op.as_bytes() {
                    continue;
                }

                let has_space_before = i > 0 && bytes[i - 1].is_ascii_whitespace();
                let has_space_after = end < input.len() && bytes[end].is_ascii_whitespace();

                if has_space_before && has_space_after {
                    return Some((input[..i].trim(), &input[i..end], input[end..].trim()));
                }
            }
        }

        None
    }

    /// Split input on a separator that is outside strings and brackets
    pub(crate) fn split_top_level(input: &str, separator: char) -> Vec<&str> {
        if input.trim().is_empty() {
            return Vec::new();
        }

        let mask = Self::top_level_mask(input);
        let mut parts = Vec::new();
        let mut start = 0;

        for (i, c) in input.char_indices() {
            if c == separator && mask[i] {
                parts.push(input[start..i].trim());
                start = i + c.len_utf8();
            }
        }
        parts.push(input[start..].trim());

        parts
    }

    /// Marks the byte positions outside string literals and brackets
    fn top_level_mask(input: &str) -> Vec<bool> {
        let bytes = input.as_bytes();
        let mut mask = vec![false; bytes.len()];
        let mut depth: i32 = 0;
        let mut in_string = false;
        let mut escaped = false;

        for (i, &b) in bytes.iter().enumerate() {
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

            match b {
                b'"' => in_string = true,
                b'(' | b'[' => depth += 1,
                b')' | b']' => depth -= 1,
                _ => mask[i] = depth == 0,
            }
        }

        mask
    }

    /// Reject unterminated strings and unbalanced brackets
    fn check_balanced(input: &str) -> Result<()> {
        let mut stack = Vec::new();
        let mut in_string = false;
        let mut escaped = false;

        for c in input.chars() {
            if in_string {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    in_string = false;
                }
                continue;
            }

            match c {
                '"' => in_string = true,
                '(' | '[' => stack.push(c),
                ')' | ']' => {
                    let expected = if c == ')' { '(' } else { '[' };
                    if stack.pop() != Some(expected) {
                        return Err(ParseError::InvalidExpression(format!(
                            "Unbalanced '{}' in: {}",
                            c, input
                        )));
                    }
                }
                _ => {}
            }
        }

        if in_string {
            return Err(ParseError::InvalidExpression(format!(
                "Unterminated string literal in: {}",
                input
            )));
        }
        if let Some(open) = stack.pop() {
            return Err(ParseError::InvalidExpression(format!(
                "Unclosed '{}' in: {}",
                open, input
            )));
        }

        Ok(())
    }

    /// True if the opening bracket at the start is closed by the last character
    fn wraps(input: &str, open: u8, close: u8) -> bool {
        let bytes = input.as_bytes();
        if bytes.len() < 2 || bytes[0] != open || bytes[bytes.len() - 1] != close {
            return false;
        }

        let mut depth = 0;
        let mut in_string = false;
        let mut escaped = false;

        for (i, &b) in bytes.iter().enumerate() {
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

            match b {
                b'"' => in_string = true,
                b'(' | b'[' => depth += 1,
                b')' | b']' => {
                    depth -= 1;
                    if depth == 0 {
                        return i == bytes.len() - 1;
                    }
                }
                _ => {}
            }
        }

        false
    }

    /// Parse a double-quoted string literal spanning the whole input
    fn parse_string_literal(input: &str) -> Option<String> {
        let inner = input.strip_prefix('"')?;
        let mut result = String::new();
        let mut chars = inner.char_indices();

        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some((_, 'n')) => result.push('\n'),
                    Some((_, 't')) => result.push('\t'),
                    Some((_, other)) => result.push(other),
                    None => return None,
                },
                '"' => {
                    return if i + 1 == inner.len() { Some(result) } else { None };
                }
                _ => result.push(c),
            }
        }

        None
    }

    /// True if the text ends with something a binary `+`/`-` can follow
    fn ends_with_operand(left: &str) -> bool {
        let Some(last) = left.chars().last() else {
            return false;
        };

        if !(last.is_alphanumeric() || matches!(last, '_' | ')' | ']' | '"' | '.')) {
            return false;
        }

        // Exponent of a number literal (e.g., 1e-5)
        if matches!(last, 'e' | 'E') {
            let mantissa = &left[..left.len() - 1];
            let token_start = mantissa
                .rfind(|c: char| !(c.is_ascii_digit() || c == '.'))
                .map(|p| p + 1)
                .unwrap_or(0);
            let token = &mantissa[token_start..];
            let is_exponent = !token.is_empty()
                && token.starts_with(|c: char| c.is_ascii_digit())
                && (token_start == 0
                    || !mantissa[..token_start]
                        .ends_with(|c: char| c.is_alphanumeric() || c == '_'));
            if is_exponent {
                return false;
            }
        }

        // Keyword operators take precedence over a following sign
        !["in", "not_in", "contains", "starts_with", "ends_with", "and", "or"]
            .iter()
            .any(|kw| {
                left.strip_suffix(kw)
                    .is_some_and(|rest| rest.ends_with(char::is_whitespace))
            })
    }

    fn is_identifier(s: &str) -> bool {
        let mut chars = s.chars();
        match chars.next() {
            Some(c) if c.is_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_alphanumeric() || c == '_')
    }

    /// Check if a character is part of an operator
    fn is_operator_char(c: char) -> bool {
        matches!(
            c,
            '=' | '!' | '<' | '>' | '&' | '|' | '+' | '-' | '*' | '/' | '%'
        )
    }

    /// Parse an operator string
    fn parse_operator(op: &str) -> Result<Operator> {
        match op {
            "==" | "=" => Ok(Operator::Eq),
            "!=" => Ok(Operator::Ne),
            "<" => Ok(Operator::Lt),
            ">" => Ok(Operator::Gt),
            "<=" => Ok(Operator::Le),
            ">=" => Ok(Operator::Ge),
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Sub),
            "*" => Ok(Operator::Mul),
            "/" => Ok(Operator::Div),
            "%" => Ok(Operator::Mod),
            "&&" | "and" => Ok(Operator::And),
            "||" | "or" => Ok(Operator::Or),
            "contains" => Ok(Operator::Contains),
            "starts_with" => Ok(Operator::StartsWith),
            "ends_with" => Ok(Operator::EndsWith),
            "in" => Ok(Operator::In),
            "not_in" => Ok(Operator::NotIn),
            _ => Err(ParseError::InvalidOperator(op.to_string())),
        }
    }
}
