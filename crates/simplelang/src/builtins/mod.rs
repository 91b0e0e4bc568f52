//! The built-in operator set (spec.md §4.6): ~40 primitives registered by
//! name, each given unevaluated `CodeNode` arguments and deciding for
//! itself when (or whether) to evaluate them. This is what gives special
//! forms like `if`/`while`/`func`/`let` their lazy semantics, while a plain
//! arithmetic builtin like `add` evaluates both of its arguments up front.

mod arith;
mod binding;
mod compare;
mod control;
mod io;
mod logic;
mod seq;
mod types;

use std::sync::OnceLock;

use ahash::AHashMap;

use crate::{
    error::RunResult,
    interpreter::{eval_code, Interp, Outcome},
    value::{CodeNode, Value},
};

pub(crate) use control::force_deep;

/// A builtin's implementation: receives its unevaluated argument nodes and
/// the interpreter context, evaluating whichever arguments it needs.
pub(crate) type BuiltinFn = fn(&[CodeNode], &mut Interp) -> RunResult<Outcome>;

/// One registered builtin: name, fixed arity, and its implementation.
pub struct BuiltinEntry {
    pub name: &'static str,
    pub arity: usize,
    pub func: BuiltinFn,
}

/// Unwraps a directly-returned `Value::Code` (spec.md §4.3's `evaluate()`:
/// identity for non-`code` variants, one step of evaluation for `code`).
///
/// A `for`/`while` loop variable bound straight from a list element is the
/// common source of these — `for_` intentionally binds the raw,
/// still-unevaluated element (spec.md §4.6), so `$i` used as, say, `add`'s
/// operand must still resolve to a plain number rather than a `code` tag.
/// Does *not* descend into `list` elements: those stay lazy until their own
/// turn at this same unwrapping (or until `early`/`print` forces them
/// deeply).
fn force_scalar(mut value: Value, interp: &mut Interp) -> RunResult<Outcome> {
    loop {
        match value {
            Value::Code(node) => match eval_code(&node, interp)? {
                Outcome::Value(v) => value = v,
                other => return Ok(other),
            },
            other => return Ok(Outcome::Value(other)),
        }
    }
}

/// Evaluates a `CodeNode` argument to a plain `Value`, propagating an
/// escaping `Return`/`Break`/`Continue` outward from the enclosing builtin
/// call rather than silently discarding it.
macro_rules! eval_arg {
    ($node:expr, $interp:expr) => {
        match {
            let v = match eval_code($node, $interp)? {
                Outcome::Value(v) => v,
                other => return Ok(other),
            };
            crate::builtins::force_scalar(v, $interp)?
        } {
            Outcome::Value(v) => v,
            other => return Ok(other),
        }
    };
}
pub(crate) use eval_arg;

fn registry() -> &'static AHashMap<&'static str, BuiltinEntry> {
    static REGISTRY: OnceLock<AHashMap<&'static str, BuiltinEntry>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let entries: Vec<BuiltinEntry> = vec![
            BuiltinEntry { name: "main", arity: 1, func: control::main },
            BuiltinEntry { name: "if", arity: 2, func: control::if_ },
            BuiltinEntry { name: "if_else", arity: 3, func: control::if_else },
            BuiltinEntry { name: "for", arity: 3, func: control::for_ },
            BuiltinEntry { name: "while", arity: 2, func: control::while_ },
            BuiltinEntry { name: "return", arity: 1, func: control::return_ },
            BuiltinEntry { name: "break", arity: 0, func: control::break_ },
            BuiltinEntry { name: "continue", arity: 0, func: control::continue_ },
            BuiltinEntry { name: "exit", arity: 1, func: control::exit },
            BuiltinEntry { name: "error", arity: 1, func: control::error },
            BuiltinEntry { name: "early", arity: 1, func: control::early },
            BuiltinEntry { name: "input", arity: 1, func: io::input },
            BuiltinEntry { name: "output", arity: 1, func: io::output },
            BuiltinEntry { name: "print", arity: 1, func: io::print },
            BuiltinEntry { name: "let", arity: 2, func: binding::let_ },
            BuiltinEntry { name: "func", arity: 2, func: binding::func },
            BuiltinEntry { name: "type", arity: 1, func: types::type_ },
            BuiltinEntry { name: "is_type", arity: 2, func: types::is_type },
            BuiltinEntry { name: "to_int", arity: 1, func: types::to_int },
            BuiltinEntry { name: "to_float", arity: 1, func: types::to_float },
            BuiltinEntry { name: "to_str", arity: 1, func: types::to_str },
            BuiltinEntry { name: "to_list", arity: 1, func: types::to_list },
            BuiltinEntry { name: "eq", arity: 2, func: compare::eq },
            BuiltinEntry { name: "neq", arity: 2, func: compare::neq },
            BuiltinEntry { name: "lnq", arity: 2, func: compare::lnq },
            BuiltinEntry { name: "leq", arity: 2, func: compare::leq },
            BuiltinEntry { name: "gnq", arity: 2, func: compare::gnq },
            BuiltinEntry { name: "geq", arity: 2, func: compare::geq },
            BuiltinEntry { name: "add", arity: 2, func: arith::add },
            BuiltinEntry { name: "sub", arity: 2, func: arith::sub },
            BuiltinEntry { name: "mul", arity: 2, func: arith::mul },
            BuiltinEntry { name: "div", arity: 2, func: arith::div },
            BuiltinEntry { name: "mod", arity: 2, func: arith::mod_ },
            BuiltinEntry { name: "neg", arity: 1, func: arith::neg },
            BuiltinEntry { name: "and", arity: 2, func: logic::and },
            BuiltinEntry { name: "or", arity: 2, func: logic::or },
            BuiltinEntry { name: "not", arity: 1, func: logic::not },
            BuiltinEntry { name: "len", arity: 1, func: seq::len },
            BuiltinEntry { name: "range", arity: 3, func: seq::range },
            BuiltinEntry { name: "get", arity: 2, func: seq::get },
            BuiltinEntry { name: "set", arity: 3, func: seq::set },
            BuiltinEntry { name: "slice", arity: 4, func: seq::slice },
            BuiltinEntry { name: "copy", arity: 1, func: seq::copy },
        ];
        entries.into_iter().map(|entry| (entry.name, entry)).collect()
    })
}

/// Looks up a builtin by name, as consulted by the evaluator's call
/// dispatch (spec.md §4.5). Initializes the registry on first use.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static BuiltinEntry> {
    registry().get(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_contains_every_documented_builtin() {
        let expected = [
            "main", "if", "if_else", "for", "while", "return", "break", "continue", "exit",
            "error", "early", "input", "output", "print", "let", "func", "type", "is_type",
            "to_int", "to_float", "to_str", "to_list", "eq", "neq", "lnq", "leq", "gnq", "geq",
            "add", "sub", "mul", "div", "mod", "neg", "and", "or", "not", "len", "range", "get",
            "set", "slice", "copy",
        ];
        for name in expected {
            assert!(lookup(name).is_some(), "missing builtin '{name}'");
        }
    }

    #[test]
    fn unknown_name_is_not_registered() {
        assert!(lookup("definitely_not_a_builtin").is_none());
    }
}
