//! Control-flow builtins: `main`, `if`/`if_else`, `for`/`while`,
//! `return`/`break`/`continue`, `exit`, `error`, `early`.

use super::eval_arg;
use crate::{
    error::{RunError, RunResult},
    interpreter::{eval_code, eval_value, Interp, Outcome},
    value::{CodeNode, Value},
};

/// Evaluates a `CodeNode::List` of code elements in order, returning the
/// last value. An escaping `Return`/`Break`/`Continue` short-circuits and is
/// handed back to the caller (who decides whether to catch or re-propagate
/// it); `main` is the only builtin that swallows interrupts outright.
fn eval_body(node: &CodeNode, interp: &mut Interp) -> RunResult<Outcome> {
    let CodeNode::List(items, _) = node else {
        return Err(RunError::type_("expected a list of code as a function/loop body"));
    };
    let mut last = Outcome::absent();
    for item in items {
        match eval_code(item, interp)? {
            Outcome::Value(v) => last = Outcome::Value(v),
            escaping => return Ok(escaping),
        }
    }
    Ok(last)
}

/// Recursively forces a value's nested `code`/`list` elements to fully
/// evaluated values (spec.md §4.6 `early`). Used directly by `early` and by
/// `print`, which evaluates its argument "with `early`" before printing.
pub(crate) fn force_deep(value: Value, interp: &mut Interp) -> RunResult<Value> {
    match value {
        Value::Code(node) => {
            let inner = match eval_code(&node, interp)? {
                Outcome::Value(v) => v,
                other => return Ok(other.into_value_or_absent()),
            };
            force_deep(inner, interp)
        }
        Value::List(items) => {
            let mut forced = Vec::with_capacity(items.len());
            for item in items {
                forced.push(force_deep(item, interp)?);
            }
            Ok(Value::List(forced))
        }
        other => Ok(other),
    }
}

/// The top-level entry point. Wrapped around every program/REPL line as
/// `$(main (S))`; directly invoking it from user code a second time is a
/// user error.
///
/// Returns the last top-level form's value rather than `absent`/`int(0)`
/// (the original returns `None` here); this is an intentional deviation,
/// not an oversight — `main`'s return value is never observable from user
/// code (nothing can call it but the top-level wrapper), and `run_source`
/// surfaces it to host/embedding callers and tests as the program's result.
pub(crate) fn main(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    if interp.called_main {
        return Err(RunError::user("'main' can't be called by the user."));
    }
    interp.called_main = true;

    let list_value = eval_arg!(&args[0], interp);
    let Value::List(items) = list_value else {
        return Err(RunError::type_(format!(
            "'main' expects a list, got '{}'",
            list_value.tag()
        )));
    };

    let mut last = Value::Int(0);
    for item in &items {
        match eval_value(item, interp)? {
            Outcome::Value(v) => last = v,
            // A return/break/continue escaping a top-level form is
            // swallowed at this boundary (spec.md §4.6).
            Outcome::Return(_) | Outcome::Break | Outcome::Continue => {}
        }
    }
    Ok(Outcome::Value(last))
}

pub(crate) fn if_(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let cond = eval_arg!(&args[0], interp);
    if cond.truthy() {
        eval_body(&args[1], interp)
    } else {
        Ok(Outcome::absent())
    }
}

pub(crate) fn if_else(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let cond = eval_arg!(&args[0], interp);
    if cond.truthy() {
        eval_body(&args[1], interp)
    } else {
        eval_body(&args[2], interp)
    }
}

pub(crate) fn for_(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let CodeNode::Name(name, _) = &args[0] else {
        return Err(RunError::type_("'for' expects a name as its first argument"));
    };
    let list_value = eval_arg!(&args[1], interp);
    let Value::List(items) = list_value else {
        return Err(RunError::type_(format!(
            "'for' expects a list, got '{}'",
            list_value.tag()
        )));
    };

    for item in items {
        interp.frames.assign_variable(name, &item);
        match eval_body(&args[2], interp)? {
            Outcome::Value(_) | Outcome::Continue => {}
            Outcome::Break => break,
            ret @ Outcome::Return(_) => return Ok(ret),
        }
    }
    Ok(Outcome::absent())
}

pub(crate) fn while_(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    loop {
        let cond = eval_arg!(&args[0], interp);
        if !cond.truthy() {
            break;
        }
        match eval_body(&args[1], interp)? {
            Outcome::Value(_) | Outcome::Continue => {}
            Outcome::Break => break,
            ret @ Outcome::Return(_) => return Ok(ret),
        }
    }
    Ok(Outcome::absent())
}

pub(crate) fn return_(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let value = eval_arg!(&args[0], interp);
    Ok(Outcome::Return(value))
}

pub(crate) fn break_(_args: &[CodeNode], _interp: &mut Interp) -> RunResult<Outcome> {
    Ok(Outcome::Break)
}

pub(crate) fn continue_(_args: &[CodeNode], _interp: &mut Interp) -> RunResult<Outcome> {
    Ok(Outcome::Continue)
}

/// Terminates the process with `status` clamped to `>= 0` (spec.md §9
/// preserves this clamping for compatibility with the source behavior).
pub(crate) fn exit(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let status = eval_arg!(&args[0], interp);
    let Value::Int(code) = status else {
        return Err(RunError::type_(format!(
            "'exit' expects an int, got '{}'",
            status.tag()
        )));
    };
    let clamped = code.max(0);
    log::info!("exit({clamped})");
    std::process::exit(i32::try_from(clamped).unwrap_or(i32::MAX));
}

pub(crate) fn error(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let message = eval_arg!(&args[0], interp);
    let Value::Str(message) = message else {
        return Err(RunError::type_(format!(
            "'error' expects a str, got '{}'",
            message.tag()
        )));
    };
    Err(RunError::user(message))
}

pub(crate) fn early(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let value = eval_arg!(&args[0], interp);
    Ok(Outcome::Value(force_deep(value, interp)?))
}
