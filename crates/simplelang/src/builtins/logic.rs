//! Logical builtins: `and`, `or`, `not` — all return `int` 0/1 using the
//! global truthiness rule (spec.md §4.6).

use super::eval_arg;
use crate::{
    error::RunResult,
    interpreter::{Interp, Outcome},
    value::{CodeNode, Value},
};

pub(crate) fn and(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let left = eval_arg!(&args[0], interp);
    let right = eval_arg!(&args[1], interp);
    Ok(Outcome::Value(Value::Int(i64::from(left.truthy() && right.truthy()))))
}

pub(crate) fn or(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let left = eval_arg!(&args[0], interp);
    let right = eval_arg!(&args[1], interp);
    Ok(Outcome::Value(Value::Int(i64::from(left.truthy() || right.truthy()))))
}

pub(crate) fn not(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let value = eval_arg!(&args[0], interp);
    Ok(Outcome::Value(Value::Int(i64::from(!value.truthy()))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{interpreter::eval_code, io::CollectIo, parser::parse_single_expr};

    fn eval(source: &str) -> Outcome {
        let node = parse_single_expr(source).unwrap();
        let mut interp = Interp::new(Box::new(CollectIo::new(vec![])));
        eval_code(&node, &mut interp).unwrap()
    }

    #[test]
    fn and_or_not_truth_table() {
        assert_eq!(eval("$(and 1 1)"), Outcome::Value(Value::Int(1)));
        assert_eq!(eval("$(and 1 0)"), Outcome::Value(Value::Int(0)));
        assert_eq!(eval("$(or 0 0)"), Outcome::Value(Value::Int(0)));
        assert_eq!(eval("$(or 0 1)"), Outcome::Value(Value::Int(1)));
        assert_eq!(eval("$(not 0)"), Outcome::Value(Value::Int(1)));
        assert_eq!(eval("$(not 1)"), Outcome::Value(Value::Int(0)));
    }

    #[test]
    fn not_not_is_identity_on_truthiness() {
        assert_eq!(eval("$(not $(not 5))"), Outcome::Value(Value::Int(1)));
        assert_eq!(eval("$(not $(not 0))"), Outcome::Value(Value::Int(0)));
    }

    #[test]
    fn float_zero_is_truthy() {
        assert_eq!(eval("$(not 0.0)"), Outcome::Value(Value::Int(0)));
    }
}
