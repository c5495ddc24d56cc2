//! Built-in functions of the expression language

use crate::error::EvalError;
use dmn_core::Value;

/// Call a built-in function.
///
/// A null argument yields null, except for `min`/`max` which skip nulls.
pub(crate) fn call_function(name: &str, args: &[Value]) -> Result<Value, EvalError> {
    match name {
        "min" => extremum(name, args, |candidate, best| candidate < best),
        "max" => extremum(name, args, |candidate, best| candidate > best),
        "round" => {
            expect_arity(name, args, 1, 2)?;
            if args.iter().any(Value::is_null) {
                return Ok(Value::Null);
            }
            let n = number_arg(name, &args[0])?;
            let digits = match args.get(1) {
                Some(d) => number_arg(name, d)?,
                None => 0.0,
            };
            let factor = 10f64.powi(digits as i32);
            Ok(Value::Number((n * factor).round() / factor))
        }
        "abs" | "floor" | "ceil" | "length" | "upper" | "lower" | "not" => {
            expect_arity(name, args, 1, 1)?;
            unary_function(name, &args[0])
        }
        _ => Err(EvalError::UnknownFunction(name.to_string())),
    }
}

fn unary_function(name: &str, arg: &Value) -> Result<Value, EvalError> {
    if arg.is_null() {
        return Ok(Value::Null);
    }

    match (name, arg) {
        ("abs", Value::Number(n)) => Ok(Value::Number(n.abs())),
        ("floor", Value::Number(n)) => Ok(Value::Number(n.floor())),
        ("ceil", Value::Number(n)) => Ok(Value::Number(n.ceil())),
        ("length", Value::String(s)) => Ok(Value::from(s.chars().count() as i64)),
        ("length", Value::Array(items)) => Ok(Value::from(items.len() as i64)),
        ("upper", Value::String(s)) => Ok(Value::String(s.to_uppercase())),
        ("lower", Value::String(s)) => Ok(Value::String(s.to_lowercase())),
        ("not", Value::Bool(b)) => Ok(Value::Bool(!b)),
        _ => Err(invalid(
            name,
            format!("unsupported argument type {}", arg.type_name()),
        )),
    }
}

/// `min`/`max` over either a single list argument or the argument list
fn extremum(
    name: &str,
    args: &[Value],
    better: impl Fn(f64, f64) -> bool,
) -> Result<Value, EvalError> {
    let items = match args {
        [Value::Array(items)] => items.as_slice(),
        [] => return Err(invalid(name, "expected at least one argument")),
        _ => args,
    };

    let mut best: Option<f64> = None;
    for item in items.iter().filter(|v| !v.is_null()) {
        let n = number_arg(name, item)?;
        if best.map_or(true, |b| better(n, b)) {
            best = Some(n);
        }
    }

    Ok(best.map(Value::Number).unwrap_or(Value::Null))
}

fn number_arg(name: &str, value: &Value) -> Result<f64, EvalError> {
    value.as_f64().ok_or_else(|| {
        invalid(name, format!("expected number, found {}", value.type_name()))
    })
}

fn expect_arity(name: &str, args: &[Value], min: usize, max: usize) -> Result<(), EvalError> {
    if args.len() < min || args.len() > max {
        let expected = if min == max {
            min.to_string()
        } else {
            format!("{} to {}", min, max)
        };
        return Err(invalid(
            name,
            format!("expected {} arguments, found {}", expected, args.len()),
        ));
    }
    Ok(())
}

fn invalid(function: &str, message: impl Into<String>) -> EvalError {
    EvalError::InvalidArguments {
        function: function.to_string(),
        message: message.into(),
    }
}
