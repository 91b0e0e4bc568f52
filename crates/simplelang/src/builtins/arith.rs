//! Arithmetic builtins: `add`, `sub`, `mul`, `div`, `mod`, `neg`
//! (spec.md §4.6).
//!
//! `int op int` stays `int`; any other numeric pairing widens to `float`.
//! `add` additionally concatenates two `str` or two `list`; `mul`
//! additionally repeats a `str`/`list` by an `int` count, either operand
//! order.

use super::eval_arg;
use crate::{
    error::{RunError, RunResult},
    interpreter::{Interp, Outcome},
    value::{CodeNode, Value},
};

enum Numeric {
    Int(i64),
    Float(f64),
}

fn as_numeric(value: &Value) -> Option<Numeric> {
    match value {
        Value::Int(n) => Some(Numeric::Int(*n)),
        Value::Float(f) => Some(Numeric::Float(*f)),
        _ => None,
    }
}

/// Applies `int_op`/`float_op` with the widen-to-float-on-mismatch rule,
/// erroring with `op_name` if either side isn't numeric.
fn numeric_binop(
    left: &Value,
    right: &Value,
    op_name: &str,
    int_op: impl FnOnce(i64, i64) -> RunResult<i64>,
    float_op: impl FnOnce(f64, f64) -> f64,
) -> RunResult<Value> {
    match (as_numeric(left), as_numeric(right)) {
        (Some(Numeric::Int(a)), Some(Numeric::Int(b))) => Ok(Value::Int(int_op(a, b)?)),
        (Some(a), Some(b)) => {
            let af = match a {
                Numeric::Int(n) => n as f64,
                Numeric::Float(f) => f,
            };
            let bf = match b {
                Numeric::Int(n) => n as f64,
                Numeric::Float(f) => f,
            };
            Ok(Value::Float(float_op(af, bf)))
        }
        _ => Err(RunError::type_(format!(
            "'{op_name}' requires numeric operands, got '{}' and '{}'",
            left.tag(),
            right.tag()
        ))),
    }
}

pub(crate) fn add(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let left = eval_arg!(&args[0], interp);
    let right = eval_arg!(&args[1], interp);
    let result = match (&left, &right) {
        (Value::Str(a), Value::Str(b)) => Value::Str(format!("{a}{b}")),
        (Value::List(a), Value::List(b)) => {
            Value::List(a.iter().chain(b.iter()).map(Value::copy).collect())
        }
        _ => numeric_binop(&left, &right, "add", |a, b| Ok(a.wrapping_add(b)), |a, b| a + b)?,
    };
    Ok(Outcome::Value(result))
}

pub(crate) fn sub(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let left = eval_arg!(&args[0], interp);
    let right = eval_arg!(&args[1], interp);
    let result = numeric_binop(&left, &right, "sub", |a, b| Ok(a.wrapping_sub(b)), |a, b| a - b)?;
    Ok(Outcome::Value(result))
}

pub(crate) fn mul(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let left = eval_arg!(&args[0], interp);
    let right = eval_arg!(&args[1], interp);
    let result = match (&left, &right) {
        (Value::Str(s), Value::Int(n)) | (Value::Int(n), Value::Str(s)) => {
            Value::Str(repeat_str(s, *n))
        }
        (Value::List(items), Value::Int(n)) | (Value::Int(n), Value::List(items)) => {
            Value::List(repeat_list(items, *n))
        }
        _ => numeric_binop(&left, &right, "mul", |a, b| Ok(a.wrapping_mul(b)), |a, b| a * b)?,
    };
    Ok(Outcome::Value(result))
}

fn repeat_str(s: &str, n: i64) -> String {
    s.repeat(n.max(0).try_into().unwrap_or(0))
}

fn repeat_list(items: &[Value], n: i64) -> Vec<Value> {
    let count: usize = n.max(0).try_into().unwrap_or(0);
    let mut out = Vec::with_capacity(items.len() * count);
    for _ in 0..count {
        out.extend(items.iter().map(Value::copy));
    }
    out
}

pub(crate) fn div(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let left = eval_arg!(&args[0], interp);
    let right = eval_arg!(&args[1], interp);
    let is_zero = match as_numeric(&right) {
        Some(Numeric::Int(0)) => true,
        Some(Numeric::Float(f)) => f == 0.0,
        _ => false,
    };
    if is_zero {
        return Err(RunError::div_by_zero());
    }
    let result = numeric_binop(
        &left,
        &right,
        "div",
        // int / int truncates toward zero (Rust's `/` already does).
        |a, b| Ok(a / b),
        |a, b| a / b,
    )?;
    Ok(Outcome::Value(result))
}

pub(crate) fn mod_(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let left = eval_arg!(&args[0], interp);
    let right = eval_arg!(&args[1], interp);
    let (Value::Int(a), Value::Int(b)) = (&left, &right) else {
        return Err(RunError::type_(format!(
            "'mod' requires two int operands, got '{}' and '{}'",
            left.tag(),
            right.tag()
        )));
    };
    if *b == 0 {
        return Err(RunError::div_by_zero());
    }
    Ok(Outcome::Value(Value::Int(a % b)))
}

pub(crate) fn neg(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let value = eval_arg!(&args[0], interp);
    let result = match value {
        Value::Int(n) => Value::Int(-n),
        Value::Float(f) => Value::Float(-f),
        other => {
            return Err(RunError::type_(format!(
                "'neg' requires a numeric operand, got '{}'",
                other.tag()
            )));
        }
    };
    Ok(Outcome::Value(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{interpreter::eval_code, io::CollectIo, parser::parse_single_expr};

    fn eval(source: &str) -> RunResult<Outcome> {
        let node = parse_single_expr(source).unwrap();
        let mut interp = Interp::new(Box::new(CollectIo::new(vec![])));
        eval_code(&node, &mut interp)
    }

    #[test]
    fn int_div_truncates_toward_zero() {
        assert_eq!(eval("$(div 7 2)").unwrap(), Outcome::Value(Value::Int(3)));
        assert_eq!(eval("$(div -7 2)").unwrap(), Outcome::Value(Value::Int(-3)));
    }

    #[test]
    fn mixed_div_widens_to_float() {
        assert_eq!(eval("$(div 7.0 2)").unwrap(), Outcome::Value(Value::Float(3.5)));
    }

    #[test]
    fn div_by_zero_is_an_error() {
        assert_eq!(
            eval("$(div 1 0)").unwrap_err().kind,
            crate::error::ErrorKind::DivByZero
        );
    }

    #[test]
    fn str_mul_repeats() {
        assert_eq!(
            eval("$(mul 'ab' 3)").unwrap(),
            Outcome::Value(Value::Str("ababab".to_owned()))
        );
    }

    #[test]
    fn str_add_concatenates_not_list_literal() {
        assert_eq!(
            eval("$(add '(' ')')").unwrap(),
            Outcome::Value(Value::Str("()".to_owned()))
        );
    }

    #[test]
    fn mod_requires_two_ints() {
        assert_eq!(eval("$(mod 7 3)").unwrap(), Outcome::Value(Value::Int(1)));
        assert_eq!(
            eval("$(mod 7.0 3)").unwrap_err().kind,
            crate::error::ErrorKind::Type
        );
    }

    #[test]
    fn neg_requires_numeric() {
        assert_eq!(eval("$(neg 5)").unwrap(), Outcome::Value(Value::Int(-5)));
        assert_eq!(eval("$(neg 'x')").unwrap_err().kind, crate::error::ErrorKind::Type);
    }
}
