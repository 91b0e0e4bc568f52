//! Sequence builtins: `len`, `range`, `get`, `set`, `slice`, `copy`
//! (spec.md §4.6).

use super::eval_arg;
use crate::{
    error::{RunError, RunResult},
    interpreter::{Interp, Outcome},
    value::{CodeNode, Value},
};

/// Negative indices wrap modulo length (spec.md §4.6 `get`); an empty
/// sequence has no valid index regardless of what's asked for.
fn wrap_index(idx: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len_i = len as i64;
    let wrapped = idx.rem_euclid(len_i);
    Some(wrapped as usize)
}

pub(crate) fn len(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let value = eval_arg!(&args[0], interp);
    let n = match &value {
        Value::Str(s) => s.chars().count(),
        Value::List(items) => items.len(),
        other => {
            return Err(RunError::type_(format!(
                "'len' expects a str or list, got '{}'",
                other.tag()
            )));
        }
    };
    Ok(Outcome::Value(Value::Int(n as i64)))
}

pub(crate) fn range(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let start = eval_arg!(&args[0], interp);
    let end = eval_arg!(&args[1], interp);
    let step = eval_arg!(&args[2], interp);
    let (Value::Int(start), Value::Int(end), Value::Int(step)) = (&start, &end, &step) else {
        return Err(RunError::type_("'range' expects three ints"));
    };
    if *step == 0 {
        return Err(RunError::type_("'range' step must not be zero"));
    }
    let mut items = Vec::new();
    let mut i = *start;
    if *step > 0 {
        while i < *end {
            items.push(Value::Int(i));
            i += step;
        }
    } else {
        while i > *end {
            items.push(Value::Int(i));
            i += step;
        }
    }
    Ok(Outcome::Value(Value::List(items)))
}

pub(crate) fn get(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let seq = eval_arg!(&args[0], interp);
    let index = eval_arg!(&args[1], interp);
    let Value::Int(index) = index else {
        return Err(RunError::type_(format!(
            "'get' expects an int index, got '{}'",
            index.tag()
        )));
    };
    let result = match &seq {
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let i = wrap_index(index, chars.len())
                .ok_or_else(|| RunError::index(format!("index {index} out of range for str of length 0")))?;
            Value::Str(chars[i].to_string())
        }
        Value::List(items) => {
            let i = wrap_index(index, items.len()).ok_or_else(|| {
                RunError::index(format!("index {index} out of range for list of length 0"))
            })?;
            items[i].copy()
        }
        other => {
            return Err(RunError::type_(format!(
                "'get' expects a str or list, got '{}'",
                other.tag()
            )));
        }
    };
    Ok(Outcome::Value(result))
}

pub(crate) fn set(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let seq = eval_arg!(&args[0], interp);
    let index = eval_arg!(&args[1], interp);
    let replacement = eval_arg!(&args[2], interp);
    let Value::Int(index) = index else {
        return Err(RunError::type_(format!(
            "'set' expects an int index, got '{}'",
            index.tag()
        )));
    };
    let result = match seq {
        Value::Str(s) => {
            let Value::Str(replacement) = &replacement else {
                return Err(RunError::type_(format!(
                    "'set' on a str expects a single-character str replacement, got '{}'",
                    replacement.tag()
                )));
            };
            if replacement.chars().count() != 1 {
                return Err(RunError::type_(
                    "'set' on a str expects a single-character str replacement",
                ));
            }
            let mut chars: Vec<char> = s.chars().collect();
            let i = wrap_index(index, chars.len())
                .ok_or_else(|| RunError::index(format!("index {index} out of range for str of length 0")))?;
            chars[i] = replacement.chars().next().expect("checked len == 1");
            Value::Str(chars.into_iter().collect())
        }
        Value::List(mut items) => {
            let i = wrap_index(index, items.len()).ok_or_else(|| {
                RunError::index(format!("index {index} out of range for list of length 0"))
            })?;
            items[i] = replacement;
            Value::List(items)
        }
        other => {
            return Err(RunError::type_(format!(
                "'set' expects a str or list, got '{}'",
                other.tag()
            )));
        }
    };
    Ok(Outcome::Value(result))
}

/// Clamps a slice boundary to `[0, len]`, treating a negative value as an
/// offset from the end (Python-style), without the `get`/`set` modulo
/// wraparound — a slice can legitimately start or end at `len` itself.
fn clamp_bound(idx: i64, len: usize) -> usize {
    let len_i = len as i64;
    let adjusted = if idx < 0 { idx + len_i } else { idx };
    adjusted.clamp(0, len_i) as usize
}

pub(crate) fn slice(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let seq = eval_arg!(&args[0], interp);
    let start = eval_arg!(&args[1], interp);
    let end = eval_arg!(&args[2], interp);
    let step = eval_arg!(&args[3], interp);
    let (Value::Int(start), Value::Int(end), Value::Int(step)) = (&start, &end, &step) else {
        return Err(RunError::type_("'slice' expects int start/end/step"));
    };
    if *step == 0 {
        return Err(RunError::type_("'slice' step must not be zero"));
    }

    let result = match seq {
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let picked = slice_indices(chars.len(), *start, *end, *step);
            Value::Str(picked.into_iter().map(|i| chars[i]).collect())
        }
        Value::List(items) => {
            let picked = slice_indices(items.len(), *start, *end, *step);
            Value::List(picked.into_iter().map(|i| items[i].copy()).collect())
        }
        other => {
            return Err(RunError::type_(format!(
                "'slice' expects a str or list, got '{}'",
                other.tag()
            )));
        }
    };
    Ok(Outcome::Value(result))
}

fn slice_indices(len: usize, start: i64, end: i64, step: i64) -> Vec<usize> {
    let start = clamp_bound(start, len);
    let end = clamp_bound(end, len);
    let mut indices = Vec::new();
    if step > 0 {
        let mut i = start;
        while i < end {
            indices.push(i);
            i += step as usize;
        }
    } else {
        let mut i = start as i64;
        let end = end as i64;
        while i > end {
            indices.push(i as usize);
            i += step;
        }
    }
    indices
}

pub(crate) fn copy(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let value = eval_arg!(&args[0], interp);
    Ok(Outcome::Value(value.copy()))
}
