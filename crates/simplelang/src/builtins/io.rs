//! I/O builtins: `input`, `output`, `print`.

use super::{eval_arg, force_deep};
use crate::{
    error::{RunError, RunResult},
    interpreter::{eval_code, Interp, Outcome},
    io::Io as _,
    value::{CodeNode, Value},
};

pub(crate) fn input(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let prompt = eval_arg!(&args[0], interp);
    let Value::Str(prompt) = prompt else {
        return Err(RunError::type_(format!(
            "'input' expects a str prompt, got '{}'",
            prompt.tag()
        )));
    };
    let line = interp.io.read_line(&prompt).unwrap_or_default();
    Ok(Outcome::Value(Value::Str(line)))
}

pub(crate) fn output(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let value = eval_arg!(&args[0], interp);
    interp.io.write(&value.to_display_string());
    interp.called_print = true;
    Ok(Outcome::absent())
}

/// Evaluates its argument "with `early`", then writes the result's string
/// form and sets the `called_print` flag (spec.md §4.6, §5).
///
/// Returns `absent` (→ `int(0)`), not the printed value: the original's
/// `func_output`/`func_print` return `None`, which the evaluator converts
/// to `int(0)` (spec.md §4.5).
pub(crate) fn print(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let value = eval_arg!(&args[0], interp);
    let forced = force_deep(value, interp)?;
    interp.io.write(&forced.to_display_string());
    interp.called_print = true;
    Ok(Outcome::absent())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{io::CollectIo, parser::parse_single_expr};

    #[test]
    fn print_forces_nested_code_and_writes_display_form() {
        let node = parse_single_expr("$(print $(add 3 4))").unwrap();
        let mut interp = Interp::new(Box::new(CollectIo::new(vec![])));
        eval_code(&node, &mut interp).unwrap();
        assert!(interp.called_print);
    }

    /// `print`/`output` return `absent` (→ `int(0)`), not the printed value
    /// — the original's `func_output`/`func_print` return `None`.
    #[test]
    fn print_and_output_yield_int_zero_not_the_printed_value() {
        let node = parse_single_expr("$(print 5)").unwrap();
        let mut interp = Interp::new(Box::new(CollectIo::new(vec![])));
        assert_eq!(
            eval_code(&node, &mut interp).unwrap(),
            Outcome::Value(Value::Int(0))
        );

        let node = parse_single_expr("$(output 5)").unwrap();
        let mut interp = Interp::new(Box::new(CollectIo::new(vec![])));
        assert_eq!(
            eval_code(&node, &mut interp).unwrap(),
            Outcome::Value(Value::Int(0))
        );
    }

    #[test]
    fn input_returns_scripted_line() {
        let node = parse_single_expr("$(input 'name: ')").unwrap();
        let mut interp = Interp::new(Box::new(CollectIo::new(vec!["ada".to_owned()])));
        let outcome = eval_code(&node, &mut interp).unwrap();
        assert_eq!(outcome, Outcome::Value(Value::Str("ada".to_owned())));
    }
}
