//! Type introspection/conversion builtins: `type`, `is_type`, `to_int`,
//! `to_float`, `to_str`, `to_list` (spec.md §4.6 conversion table).

use super::eval_arg;
use crate::{
    error::{RunError, RunResult},
    interpreter::{Interp, Outcome},
    value::{CodeNode, Value},
};

pub(crate) fn type_(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let value = eval_arg!(&args[0], interp);
    Ok(Outcome::Value(Value::Str(value.tag().to_owned())))
}

/// `any` matches all tags; `num` matches `int|float`; `seq` matches
/// `str|list`; anything else must match the tag exactly.
pub(crate) fn is_type(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let value = eval_arg!(&args[0], interp);
    let wanted = eval_arg!(&args[1], interp);
    let Value::Str(wanted) = wanted else {
        return Err(RunError::type_(format!(
            "'is_type' expects a str tag name, got '{}'",
            wanted.tag()
        )));
    };
    let matches = match wanted.as_str() {
        "any" => true,
        "num" => matches!(value, Value::Int(_) | Value::Float(_)),
        "seq" => matches!(value, Value::Str(_) | Value::List(_)),
        other => value.tag() == other,
    };
    Ok(Outcome::Value(Value::Int(i64::from(matches))))
}

pub(crate) fn to_int(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let value = eval_arg!(&args[0], interp);
    let result = match &value {
        Value::Int(n) => *n,
        // "truncates via the host's integer conversion... truncation
        // toward zero" (spec.md §9 Open Question, resolved).
        Value::Float(f) => *f as i64,
        Value::Str(s) => s.trim().parse::<i64>().map_err(|_| {
            RunError::type_(format!("cannot convert '{s}' to int"))
        })?,
        other => {
            return Err(RunError::type_(format!(
                "cannot convert '{}' to int",
                other.tag()
            )));
        }
    };
    Ok(Outcome::Value(Value::Int(result)))
}

pub(crate) fn to_float(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let value = eval_arg!(&args[0], interp);
    let result = match &value {
        Value::Int(n) => *n as f64,
        Value::Float(f) => *f,
        Value::Str(s) => s.trim().parse::<f64>().map_err(|_| {
            RunError::type_(format!("cannot convert '{s}' to float"))
        })?,
        other => {
            return Err(RunError::type_(format!(
                "cannot convert '{}' to float",
                other.tag()
            )));
        }
    };
    Ok(Outcome::Value(Value::Float(result)))
}

pub(crate) fn to_str(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let value = eval_arg!(&args[0], interp);
    Ok(Outcome::Value(Value::Str(value.to_display_string())))
}

pub(crate) fn to_list(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let value = eval_arg!(&args[0], interp);
    let result = match value {
        Value::Str(s) => Value::List(s.chars().map(|c| Value::Str(c.to_string())).collect()),
        Value::List(items) => Value::List(items),
        other => {
            return Err(RunError::type_(format!(
                "cannot convert '{}' to list",
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
    fn type_returns_tag_string() {
        assert_eq!(eval("$(type 3)").unwrap(), Outcome::Value(Value::Str("int".to_owned())));
        assert_eq!(
            eval("$(type 'hi')").unwrap(),
            Outcome::Value(Value::Str("str".to_owned()))
        );
    }

    #[test]
    fn is_type_special_tags() {
        assert_eq!(eval("$(is_type 3 'num')").unwrap(), Outcome::Value(Value::Int(1)));
        assert_eq!(eval("$(is_type 3.0 'num')").unwrap(), Outcome::Value(Value::Int(1)));
        assert_eq!(eval("$(is_type 'a' 'seq')").unwrap(), Outcome::Value(Value::Int(1)));
        assert_eq!(eval("$(is_type 3 'seq')").unwrap(), Outcome::Value(Value::Int(0)));
        assert_eq!(eval("$(is_type () 'any')").unwrap(), Outcome::Value(Value::Int(1)));
    }

    #[test]
    fn to_int_truncates_float_toward_zero() {
        assert_eq!(eval("$(to_int 3.9)").unwrap(), Outcome::Value(Value::Int(3)));
        assert_eq!(eval("$(to_int -3.9)").unwrap(), Outcome::Value(Value::Int(-3)));
    }

    #[test]
    fn to_int_parses_str_or_errors() {
        assert_eq!(eval("$(to_int '42')").unwrap(), Outcome::Value(Value::Int(42)));
        assert_eq!(eval("$(to_int 'nope')").unwrap_err().kind, crate::error::ErrorKind::Type);
    }

    #[test]
    fn to_list_splits_str_into_chars() {
        assert_eq!(
            eval("$(to_list 'ab')").unwrap(),
            Outcome::Value(Value::List(vec![
                Value::Str("a".to_owned()),
                Value::Str("b".to_owned())
            ]))
        );
    }

    #[test]
    fn list_to_int_is_a_type_error() {
        assert_eq!(eval("$(to_int (1 2))").unwrap_err().kind, crate::error::ErrorKind::Type);
    }
}
