//! Token stream → `CodeNode` (spec.md §4.2).
//!
//! ```text
//! expr     := const | name | list | eval
//! eval     := '$' expr
//! list     := '(' ')' | '(' listbody ')'
//! listbody := expr | listbody expr
//! name     := NAME
//! const    := INT | FLOAT | STR
//! ```
//!
//! The top level wraps user source `S` as `$(main (S))` so that evaluating
//! the parsed tree invokes the `main` builtin with one list argument whose
//! elements are the source's top-level forms.

use crate::{
    error::{RunError, RunResult},
    lexer::{self, PosToken, Token},
    value::CodeNode,
};

/// Parses `source` into the `$(main (S))`-wrapped program tree.
///
/// # Errors
/// Returns `Error-syntax` on any lexer error or grammar violation.
pub fn parse_program(source: &str) -> RunResult<CodeNode> {
    let tokens = lexer::lex(source)?;
    let mut parser = Parser { tokens: &tokens, pos: 0 };
    let mut forms = Vec::new();
    while !parser.at_eof() {
        forms.push(parser.parse_expr()?);
    }
    let range = crate::value::CodeRange::synthetic();
    let source_list = CodeNode::List(forms, range);
    let call = CodeNode::List(
        vec![CodeNode::Name("main".to_owned(), range), source_list],
        range,
    );
    Ok(CodeNode::Eval(Box::new(call), range))
}

/// Parses a single `expr` without the top-level `main` wrapping. Exposed for
/// tests and for a future REPL mode that wants to inspect raw forms; the
/// production entry point is [`parse_program`].
#[cfg(test)]
pub(crate) fn parse_single_expr(source: &str) -> RunResult<CodeNode> {
    let tokens = lexer::lex(source)?;
    let mut parser = Parser { tokens: &tokens, pos: 0 };
    let node = parser.parse_expr()?;
    if !parser.at_eof() {
        return Err(RunError::syntax("trailing input after expression"));
    }
    Ok(node)
}

struct Parser<'a> {
    tokens: &'a [PosToken],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&PosToken> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&PosToken> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn parse_expr(&mut self) -> RunResult<CodeNode> {
        let Some(tok) = self.peek() else {
            return Err(RunError::syntax("unexpected end of input, expected an expression"));
        };
        let range = tok.range;
        log::trace!("parse expr at {range}: {:?}", tok.token);
        match &tok.token {
            Token::Int(n) => {
                let n = *n;
                self.advance();
                Ok(CodeNode::Int(n, range))
            }
            Token::Float(f) => {
                let f = *f;
                self.advance();
                Ok(CodeNode::Float(f, range))
            }
            Token::Str(s) => {
                let s = s.clone();
                self.advance();
                Ok(CodeNode::Str(s, range))
            }
            Token::Name(n) => {
                let n = n.clone();
                self.advance();
                Ok(CodeNode::Name(n, range))
            }
            Token::Dollar => {
                self.advance();
                let inner = self.parse_expr()?;
                Ok(CodeNode::Eval(Box::new(inner), range))
            }
            Token::LParen => self.parse_list(),
            Token::RParen => Err(RunError::syntax(format!("unexpected ')' at {range}"))),
        }
    }

    fn parse_list(&mut self) -> RunResult<CodeNode> {
        let open = self.advance().expect("caller checked for LParen").range;
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => {
                    return Err(RunError::syntax(format!(
                        "unterminated list starting at {open}"
                    )));
                }
                Some(tok) if tok.token == Token::RParen => {
                    self.advance();
                    break;
                }
                Some(_) => items.push(self.parse_expr()?),
            }
        }
        Ok(CodeNode::List(items, open))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CodeRange;

    fn r() -> CodeRange {
        CodeRange::synthetic()
    }

    #[test]
    fn parses_literal_list() {
        let node = parse_single_expr("(1 2 3)").unwrap();
        assert_eq!(
            node,
            CodeNode::List(
                vec![CodeNode::Int(1, r()), CodeNode::Int(2, r()), CodeNode::Int(3, r())],
                r()
            )
        );
    }

    #[test]
    fn parses_nested_eval_call() {
        let node = parse_single_expr("$(add $a 1)").unwrap();
        match node {
            CodeNode::Eval(inner, _) => match *inner {
                CodeNode::List(items, _) => {
                    assert_eq!(items.len(), 3);
                    assert_eq!(items[0], CodeNode::Name("add".to_owned(), r()));
                    assert!(matches!(items[1], CodeNode::Eval(..)));
                    assert_eq!(items[2], CodeNode::Int(1, r()));
                }
                _ => panic!("expected list"),
            },
            _ => panic!("expected eval"),
        }
    }

    #[test]
    fn empty_list_parses() {
        let node = parse_single_expr("()").unwrap();
        assert_eq!(node, CodeNode::List(vec![], r()));
    }

    #[test]
    fn unterminated_list_is_syntax_error() {
        assert!(parse_single_expr("(1 2").is_err());
    }

    #[test]
    fn program_wraps_source_in_main_call() {
        let node = parse_program("$(let a 1)").unwrap();
        match node {
            CodeNode::Eval(inner, _) => match *inner {
                CodeNode::List(items, _) => {
                    assert_eq!(items.len(), 2);
                    assert_eq!(items[0], CodeNode::Name("main".to_owned(), r()));
                    match &items[1] {
                        CodeNode::List(forms, _) => assert_eq!(forms.len(), 1),
                        _ => panic!("expected source list"),
                    }
                }
                _ => panic!("expected list"),
            },
            _ => panic!("expected eval"),
        }
    }
}
