//! Comparison builtins: `eq`, `neq`, `lnq`, `leq`, `gnq`, `geq`.
//!
//! Numeric compare spans `int`/`float`; string compare is lexicographic;
//! `eq`/`neq` additionally allow `list` (elementwise) and `name` (value
//! equality). Cross-type comparison is "not equal" for `eq`/`neq` and a
//! type error for the ordered operators.

use std::cmp::Ordering;

use super::{eval_arg, force_deep};
use crate::{
    error::{RunError, RunResult},
    interpreter::{Interp, Outcome},
    value::{CodeNode, Value},
};

/// Structural equality used by `eq`/`neq`, after forcing both operands to
/// fully evaluated values (so `(1 2)` compares against `$xs` by value, not
/// by the shape of their unevaluated `Code` leaves).
///
/// Cross-tag comparison is false, including `int` vs `float` — the source's
/// `func_eq` returns false whenever `left.type != right.type`, and spec.md
/// §4.6 says cross-type comparison is "not-equal" for `eq`/`neq`.
///
/// Lists of different lengths are unequal — the Open Question in spec.md
/// §9 is resolved this way, and the `neq`-on-lists "any element equal"
/// quirk is *not* reproduced: `neq` is simply `!eq`.
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Name(a), Value::Name(b)) => a == b,
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        _ => false,
    }
}

fn numeric_order(left: &Value, right: &Value) -> RunResult<Ordering> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => {
            a.partial_cmp(b).ok_or_else(|| RunError::type_("cannot order NaN"))
        }
        (Value::Int(a), Value::Float(b)) => (*a as f64)
            .partial_cmp(b)
            .ok_or_else(|| RunError::type_("cannot order NaN")),
        (Value::Float(a), Value::Int(b)) => a
            .partial_cmp(&(*b as f64))
            .ok_or_else(|| RunError::type_("cannot order NaN")),
        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
        _ => Err(RunError::type_(format!(
            "cannot compare '{}' and '{}'",
            left.tag(),
            right.tag()
        ))),
    }
}

macro_rules! eq_like_builtin {
    ($name:ident, $negate:expr) => {
        pub(crate) fn $name(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
            let left = eval_arg!(&args[0], interp);
            let right = eval_arg!(&args[1], interp);
            let left = force_deep(left, interp)?;
            let right = force_deep(right, interp)?;
            let equal = values_equal(&left, &right);
            let result = if $negate { !equal } else { equal };
            Ok(Outcome::Value(Value::Int(i64::from(result))))
        }
    };
}

eq_like_builtin!(eq, false);
eq_like_builtin!(neq, true);

macro_rules! ordered_builtin {
    ($name:ident, $matches:expr) => {
        pub(crate) fn $name(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
            let left = eval_arg!(&args[0], interp);
            let right = eval_arg!(&args[1], interp);
            let ordering = numeric_order(&left, &right)?;
            let matches: fn(Ordering) -> bool = $matches;
            Ok(Outcome::Value(Value::Int(i64::from(matches(ordering)))))
        }
    };
}

ordered_builtin!(lnq, |o| o == Ordering::Less);
ordered_builtin!(leq, |o| o != Ordering::Greater);
ordered_builtin!(gnq, |o| o == Ordering::Greater);
ordered_builtin!(geq, |o| o != Ordering::Less);

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
    fn eq_cross_type_is_false_not_error() {
        assert_eq!(eval("$(eq 1 'x')").unwrap(), Outcome::Value(Value::Int(0)));
    }

    #[test]
    fn eq_int_vs_float_is_false() {
        assert_eq!(eval("$(eq 1 1.0)").unwrap(), Outcome::Value(Value::Int(0)));
        assert_eq!(eval("$(neq 1 1.0)").unwrap(), Outcome::Value(Value::Int(1)));
    }

    #[test]
    fn eq_int_vs_float_is_false_elementwise_too() {
        assert_eq!(eval("$(eq (1) (1.0))").unwrap(), Outcome::Value(Value::Int(0)));
    }

    #[test]
    fn lists_of_different_length_are_unequal() {
        assert_eq!(eval("$(eq (1 2) (1 2 3))").unwrap(), Outcome::Value(Value::Int(0)));
    }

    #[test]
    fn lists_elementwise_equal() {
        assert_eq!(eval("$(eq (1 2) (1 2))").unwrap(), Outcome::Value(Value::Int(1)));
    }

    #[test]
    fn neq_is_negation_of_eq_for_lists() {
        assert_eq!(eval("$(neq (1 2) (1 3))").unwrap(), Outcome::Value(Value::Int(1)));
    }

    #[test]
    fn ordered_compare_cross_type_is_type_error() {
        assert_eq!(eval("$(lnq 1 'x')").unwrap_err().kind, crate::error::ErrorKind::Type);
    }

    #[test]
    fn mixed_numeric_ordering() {
        assert_eq!(eval("$(lnq 1 1.5)").unwrap(), Outcome::Value(Value::Int(1)));
        assert_eq!(eval("$(geq 2.0 2)").unwrap(), Outcome::Value(Value::Int(1)));
    }
}
