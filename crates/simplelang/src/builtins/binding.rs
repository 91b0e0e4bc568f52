//! Assignment/binding builtins: `let`, `func`.

use super::eval_arg;
use crate::{
    error::{RunError, RunResult},
    interpreter::{Interp, Outcome},
    value::{CodeNode, FuncValue, Value},
};

pub(crate) fn let_(args: &[CodeNode], interp: &mut Interp) -> RunResult<Outcome> {
    let CodeNode::Name(name, _) = &args[0] else {
        return Err(RunError::type_("'let' expects a name as its first argument"));
    };
    let value = eval_arg!(&args[1], interp);
    interp.frames.assign_variable(name, &value);
    Ok(Outcome::Value(value))
}

pub(crate) fn func(args: &[CodeNode], _interp: &mut Interp) -> RunResult<Outcome> {
    let CodeNode::List(param_nodes, _) = &args[0] else {
        return Err(RunError::type_("'func' expects a list of names as its first argument"));
    };
    let mut params = Vec::with_capacity(param_nodes.len());
    for node in param_nodes {
        let CodeNode::Name(name, _) = node else {
            return Err(RunError::type_("'func' parameter list must contain only names"));
        };
        params.push(name.clone());
    }
    let CodeNode::List(body, _) = &args[1] else {
        return Err(RunError::type_("'func' expects a list of code as its second argument"));
    };
    Ok(Outcome::Value(Value::Func(FuncValue {
        params,
        body: body.clone(),
    })))
}
