//! `CodeNode` → `Value` evaluation (spec.md §4.5).
//!
//! Control flow is threaded explicitly as a sum type rather than via
//! exceptions (the design note in spec.md §9): [`Outcome`] is
//! `Value | Return | Break | Continue`, and [`RunResult`] wraps it with the
//! error channel. Loop builtins handle `Break`/`Continue`; user-call
//! dispatch handles `Return`; everything else propagates through `?`.

use crate::{
    builtins,
    error::{RunError, RunResult},
    frame::Frames,
    io::Io,
    value::{CodeNode, FuncValue, Value},
};

/// The result of evaluating one `CodeNode`: a plain value, or one of the
/// two interrupt kinds from spec.md §7. Never user-visible as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Value(Value),
    Return(Value),
    Break,
    Continue,
}

impl Outcome {
    /// "A return of `absent` becomes `int(0)`" (spec.md §4.5) — the
    /// fallback used wherever a builtin has nothing meaningful to return.
    #[must_use]
    pub fn absent() -> Self {
        Self::Value(Value::Int(0))
    }

    /// Unwraps a plain value, coercing any interrupt to `int(0)`. Used by
    /// `early`/`print` when forcing nested evaluation, where an interrupt
    /// escaping from inside a literal list would be a user authoring bug
    /// rather than a meaningful control-flow signal.
    #[must_use]
    pub fn into_value_or_absent(self) -> Value {
        match self {
            Self::Value(v) => v,
            Self::Return(v) => v,
            Self::Break | Self::Continue => Value::Int(0),
        }
    }
}

/// Process-wide state threaded through evaluation: the frame stack, the
/// `called_main` latch, and the `called_print` flag (spec.md §3, §5) —
/// bundled into one context per the design note in spec.md §9, rather than
/// kept as global statics, so the REPL can reset `called_main` between
/// lines without disturbing anything else.
pub struct Interp {
    pub frames: Frames,
    pub io: Box<dyn Io>,
    pub called_main: bool,
    pub called_print: bool,
}

impl Interp {
    #[must_use]
    pub fn new(io: Box<dyn Io>) -> Self {
        Self {
            frames: Frames::default(),
            io,
            called_main: false,
            called_print: false,
        }
    }

    /// Resets the `main` latch so the next `run_source` call can invoke
    /// `main` again — used by the REPL between lines (spec.md §6).
    pub fn reset_main_latch(&mut self) {
        self.called_main = false;
    }
}

/// Evaluates a parsed `CodeNode` (spec.md §4.5).
///
/// # Errors
/// Propagates any `RunError` raised during evaluation.
pub fn eval_code(node: &CodeNode, interp: &mut Interp) -> RunResult<Outcome> {
    match node {
        CodeNode::Int(n, _) => Ok(Outcome::Value(Value::Int(*n))),
        CodeNode::Float(f, _) => Ok(Outcome::Value(Value::Float(*f))),
        CodeNode::Str(s, _) => Ok(Outcome::Value(Value::Str(s.clone()))),
        CodeNode::Name(n, _) => Ok(Outcome::Value(Value::Name(n.clone()))),
        CodeNode::List(items, _) => {
            // Literal list: children remain unevaluated until `eval`,
            // `early`, or a consuming builtin forces them (SPEC_FULL.md §4).
            let wrapped = items
                .iter()
                .map(|c| Value::Code(Box::new(c.clone())))
                .collect();
            Ok(Outcome::Value(Value::List(wrapped)))
        }
        CodeNode::Eval(target, _) => eval_eval(target, interp),
    }
}

/// Evaluates a `Value`, forcing one level of `Value::Code` if present.
/// Identity for every other variant (spec.md §4.3).
pub fn eval_value(value: &Value, interp: &mut Interp) -> RunResult<Outcome> {
    match value {
        Value::Code(node) => eval_code(node, interp),
        other => Ok(Outcome::Value(other.copy())),
    }
}

fn eval_eval(target: &CodeNode, interp: &mut Interp) -> RunResult<Outcome> {
    match target {
        CodeNode::Name(name, _) => match interp.frames.lookup_variable(name) {
            Some(value) => Ok(Outcome::Value(value.clone())),
            None => Err(RunError::lookup(format!("'{name}' is not defined"))),
        },
        CodeNode::List(items, _) => eval_call(items, interp),
        // "If target.op is any other literal kind: return its evaluated
        // value (so $3 yields 3)."
        other => eval_code(other, interp),
    }
}

fn eval_call(items: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let Some((head, rest)) = items.split_first() else {
        return Err(RunError::type_("empty list () is not callable"));
    };

    if let CodeNode::Name(name, _) = head {
        // A bare name in head position resolves against user-bound
        // functions first, then the builtin registry — not against the
        // generic variable namespace, so `let`-bound non-func values never
        // shadow a builtin of the same name by accident (spec.md §4.5).
        if let Some(Value::Func(func)) = interp.frames.lookup_variable(name).cloned() {
            log::debug!("call user function '{name}' with {} args", rest.len());
            return call_user_func(&func, rest, interp);
        }
        if let Some(entry) = builtins::lookup(name) {
            log::debug!("call builtin '{name}' with {} args", rest.len());
            return call_builtin(entry, rest, interp);
        }
        return Err(RunError::lookup(format!("'{name}' is not defined")));
    }

    match eval_code(head, interp)? {
        Outcome::Value(Value::Func(func)) => call_user_func(&func, rest, interp),
        Outcome::Value(other) => Err(RunError::type_(format!("value of type '{}' is not callable", other.tag()))),
        escaping => Ok(escaping),
    }
}

fn call_builtin(entry: &'static builtins::BuiltinEntry, rest: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    if rest.len() != entry.arity {
        return Err(RunError::arg(format!(
            "'{}' expects {} argument(s), got {}",
            entry.name,
            entry.arity,
            rest.len()
        )));
    }
    (entry.func)(rest, interp)
}

/// Calls a user-defined function: eager argument evaluation, a wound frame,
/// sequential body evaluation, `unwind()` on every exit path.
fn call_user_func(func: &FuncValue, rest: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    if rest.len() != func.params.len() {
        return Err(RunError::arg(format!(
            "function expects {} argument(s), got {}",
            func.params.len(),
            rest.len()
        )));
    }

    let mut arg_values = Vec::with_capacity(rest.len());
    for arg in rest {
        match eval_code(arg, interp)? {
            Outcome::Value(v) => arg_values.push(v),
            escaping => return Ok(escaping),
        }
    }

    interp.frames.wind()?;
    let result = run_body_with_bindings(func, &arg_values, interp);
    interp.frames.unwind();
    result
}

fn run_body_with_bindings(func: &FuncValue, args: &[Value], interp: &mut Interp) -> RunResult<Outcome> {
    for (name, value) in func.params.iter().zip(args) {
        interp.frames.assign_variable(name, value);
    }
    let mut last = Outcome::absent();
    for stmt in &func.body {
        match eval_code(stmt, interp)? {
            Outcome::Return(v) => return Ok(Outcome::Value(v)),
            value @ Outcome::Value(_) => last = value,
            escaping @ (Outcome::Break | Outcome::Continue) => return Ok(escaping),
        }
    }
    Ok(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{io::CollectIo, parser::parse_single_expr};

    #[test]
    fn undefined_name_lookup_is_a_lookup_error() {
        let node = parse_single_expr("$undefined_name").unwrap();
        let mut interp = Interp::new(Box::new(CollectIo::new(vec![])));
        let err = eval_code(&node, &mut interp).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Lookup);
    }

    #[test]
    fn empty_call_is_type_error() {
        let node = parse_single_expr("$()").unwrap();
        let mut interp = Interp::new(Box::new(CollectIo::new(vec![])));
        let err = eval_code(&node, &mut interp).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Type);
    }

    #[test]
    fn dollar_on_a_literal_returns_its_value() {
        let node = parse_single_expr("$3").unwrap();
        let mut interp = Interp::new(Box::new(CollectIo::new(vec![])));
        assert_eq!(
            eval_code(&node, &mut interp).unwrap(),
            Outcome::Value(Value::Int(3))
        );
    }

    #[test]
    fn literal_list_elements_stay_unevaluated_code() {
        let node = parse_single_expr("(1 2 3)").unwrap();
        let mut interp = Interp::new(Box::new(CollectIo::new(vec![])));
        match eval_code(&node, &mut interp).unwrap() {
            Outcome::Value(Value::List(items)) => {
                assert_eq!(items.len(), 3);
                assert!(matches!(items[0], Value::Code(_)));
            }
            other => panic!("expected a list, got {other:?}"),
        }
    }
}
