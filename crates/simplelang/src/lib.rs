//! SimpleLang: a small dynamically-typed, S-expression-based scripting
//! language (see `SPEC_FULL.md` for the full specification this crate
//! implements).
//!
//! The core is a tree-walking interpreter: [`lexer`] and [`parser`] turn
//! source text into a [`value::CodeNode`] tree, [`interpreter`] evaluates
//! that tree against a [`frame::Frames`] stack, consulting [`builtins`] for
//! the ~40 registered primitives. The crate depends only on the abstract
//! [`io::Io`] hook for terminal interaction — the REPL driver, file runner,
//! and terminal I/O live in the `simplelang-cli` binary crate.

pub mod builtins;
pub mod error;
pub mod frame;
pub mod interpreter;
pub mod io;
pub mod lexer;
pub mod parser;
pub mod resource;
pub mod value;

use error::RunResult;
use interpreter::{eval_code, Interp, Outcome};
use value::Value;

/// Parses and evaluates one unit of source text against `interp`.
///
/// This is the single entry point both the file runner and the REPL drive:
/// it wraps `source` as `$(main (S))` (spec.md §4.2) before evaluating, so
/// callers should reset [`Interp::reset_main_latch`] between independent
/// top-level runs (the REPL does this per line; a file runner calls this
/// once and exits).
///
/// # Errors
/// Propagates any `RunError` raised while lexing, parsing, or evaluating.
pub fn run_source(source: &str, interp: &mut Interp) -> RunResult<Value> {
    let program = parser::parse_program(source)?;
    match eval_code(&program, interp)? {
        // `main` never itself escapes as a loop/return interrupt — it
        // swallows any that reach it (spec.md §4.6) — but the evaluator's
        // return type doesn't encode that statically, so fall back to
        // `absent` rather than panicking if it ever did.
        Outcome::Value(value) => Ok(value),
        Outcome::Return(value) => Ok(value),
        Outcome::Break | Outcome::Continue => Ok(Value::Int(0)),
    }
}
