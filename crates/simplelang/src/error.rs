//! The error-kind taxonomy raised by the lexer, parser, and evaluator.
//!
//! Interrupts (`return`/`break`/`continue`) are *not* errors and never flow
//! through this type — see [`crate::interpreter::Outcome`]. Everything here
//! is user-visible and formatted by the CLI as `[<ErrorKind>] <message>`.

use std::fmt;

use strum::Display;

/// Result alias for operations that can raise a SimpleLang runtime error.
pub type RunResult<T> = Result<T, RunError>;

/// The kind of error raised, used both for display and for tests that want
/// to assert on the failure mode without string-matching the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// Lexer/parser rejected the input.
    #[strum(serialize = "Error-syntax")]
    Syntax,
    /// Call arity mismatch (builtin or user function).
    #[strum(serialize = "Error-arg")]
    Arg,
    /// Argument had the wrong tag, or an unsupported operand combination.
    #[strum(serialize = "Error-type")]
    Type,
    /// Sequence access out of bounds.
    #[strum(serialize = "Error-index")]
    Index,
    /// Division or modulus by zero.
    #[strum(serialize = "Error-divbyzero")]
    DivByZero,
    /// Name not bound (variable or function).
    #[strum(serialize = "Error-lookup")]
    Lookup,
    /// The `error` builtin was invoked by user code.
    #[strum(serialize = "Error-user")]
    User,
    /// The resource guard's maximum call depth was exceeded on `wind()`.
    ///
    /// An addition over the seven kinds in the distilled spec; see
    /// `SPEC_FULL.md` §7.
    #[strum(serialize = "Error-recursion")]
    Recursion,
}

/// A user-visible SimpleLang error: a kind plus a human-readable message.
///
/// Displays exactly as `[<ErrorKind>] <message>`, matching the CLI's
/// error-reporting contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunError {
    pub kind: ErrorKind,
    pub message: String,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::error::Error for RunError {}

impl RunError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax, message)
    }

    pub fn arg(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Arg, message)
    }

    pub fn type_(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Type, message)
    }

    pub fn index(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Index, message)
    }

    pub fn div_by_zero() -> Self {
        Self::new(ErrorKind::DivByZero, "Dividing by zero is illegal.")
    }

    pub fn lookup(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Lookup, message)
    }

    pub fn user(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::User, message)
    }

    pub fn recursion(limit: usize) -> Self {
        Self::new(
            ErrorKind::Recursion,
            format!("maximum recursion depth ({limit}) exceeded"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_bracketed_contract() {
        let err = RunError::div_by_zero();
        assert_eq!(err.to_string(), "[Error-divbyzero] Dividing by zero is illegal.");
    }

    #[test]
    fn user_error_formats_with_message() {
        let err = RunError::user("bad");
        assert_eq!(err.to_string(), "[Error-user] bad");
    }
}
