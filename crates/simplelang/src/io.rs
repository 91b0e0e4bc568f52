//! Host I/O hooks.
//!
//! The core depends only on abstract `read_line`/`write` hooks (spec.md §1)
//! so that the REPL driver, file runner, and tests can each supply their own
//! terminal behavior. Modeled on the teacher's `PrintWriter` trait family
//! (`StdPrint`, `CollectStringPrint`, `NoPrint`).

use std::{
    cell::RefCell,
    io::{self, BufRead, Write as _},
    rc::Rc,
};

/// Host I/O hook consulted by the `input`/`output`/`print` builtins.
pub trait Io {
    /// Writes `s` verbatim (no implicit separators or newline).
    fn write(&mut self, s: &str);

    /// Prints `prompt` then reads one line from the input source.
    ///
    /// Returns `None` on end-of-input (e.g. Ctrl-D at a terminal), in which
    /// case `input()` yields an empty string rather than erroring.
    fn read_line(&mut self, prompt: &str) -> Option<String>;
}

/// Default [`Io`] that talks to the process's real stdin/stdout.
#[derive(Debug, Default)]
pub struct StdIo;

impl Io for StdIo {
    fn write(&mut self, s: &str) {
        print!("{s}");
        let _ = io::stdout().flush();
    }

    fn read_line(&mut self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(line)
            }
            Err(_) => None,
        }
    }
}

/// An [`Io`] that collects all output into a string and serves scripted
/// input lines, one per call to `read_line`.
///
/// Useful for testing `print`/`input` programmatically without touching the
/// real terminal.
#[derive(Debug, Default)]
pub struct CollectIo {
    output: Rc<RefCell<String>>,
    inputs: Vec<String>,
    next_input: usize,
}

impl CollectIo {
    #[must_use]
    pub fn new(inputs: Vec<String>) -> Self {
        Self {
            output: Rc::new(RefCell::new(String::new())),
            inputs,
            next_input: 0,
        }
    }

    #[must_use]
    pub fn output(&self) -> String {
        self.output.borrow().clone()
    }

    #[must_use]
    pub fn into_output(self) -> String {
        Rc::try_unwrap(self.output).map_or_else(|rc| rc.borrow().clone(), RefCell::into_inner)
    }

    /// A handle onto the captured output that outlives moving `self` into
    /// an `Interp` as a boxed `Io` trait object — useful for integration
    /// tests that need to read output back after `run_source` returns.
    #[must_use]
    pub fn output_handle(&self) -> Rc<RefCell<String>> {
        Rc::clone(&self.output)
    }
}

impl Io for CollectIo {
    fn write(&mut self, s: &str) {
        self.output.borrow_mut().push_str(s);
    }

    fn read_line(&mut self, _prompt: &str) -> Option<String> {
        let line = self.inputs.get(self.next_input).cloned();
        self.next_input += 1;
        line
    }
}

/// An [`Io`] that discards output and reports end-of-input immediately.
///
/// Useful for benchmarking or for evaluating scripts that are known not to
/// call `input`/`output`/`print`.
#[derive(Debug, Default)]
pub struct NullIo;

impl Io for NullIo {
    fn write(&mut self, _s: &str) {}

    fn read_line(&mut self, _prompt: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_io_captures_output_and_serves_inputs() {
        let mut io = CollectIo::new(vec!["hello".to_owned()]);
        io.write("a");
        io.write("b");
        assert_eq!(io.output(), "ab");
        assert_eq!(io.read_line("> "), Some("hello".to_owned()));
        assert_eq!(io.read_line("> "), None);
    }
}
