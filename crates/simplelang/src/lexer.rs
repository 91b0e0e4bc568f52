//! Source text → token stream (spec.md §4.1).
//!
//! Alphabet: `NAME | INT | FLOAT | STR | $ | ( | )`. `FLOAT` is attempted
//! before `INT` because both accept a leading sign.

use crate::{
    error::RunResult,
    value::CodeRange,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Name(String),
    Int(i64),
    Float(f64),
    Str(String),
    Dollar,
    LParen,
    RParen,
}

/// A token paired with the location of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct PosToken {
    pub token: Token,
    pub range: CodeRange,
}

/// Tokenizes `source`, skipping whitespace and `#`-to-end-of-line comments.
///
/// # Errors
/// Returns `Error-syntax` on any character that matches none of the token
/// rules, or on a malformed string literal (unterminated, unknown escape).
pub fn lex(source: &str) -> RunResult<Vec<PosToken>> {
    let chars: Vec<char> = source.chars().collect();
    let mut lexer = Lexer {
        chars: &chars,
        pos: 0,
        line: 1,
        col: 1,
    };
    lexer.run()
}

struct Lexer<'a> {
    chars: &'a [char],
    pos: usize,
    line: u32,
    col: u32,
}

impl<'a> Lexer<'a> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn here(&self) -> CodeRange {
        CodeRange::new(self.line, self.col)
    }

    fn run(&mut self) -> RunResult<Vec<PosToken>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            let Some(c) = self.peek() else { break };
            let range = self.here();
            log::trace!("lex at {range}: {c:?}");
            let token = match c {
                '$' => {
                    self.advance();
                    Token::Dollar
                }
                '(' => {
                    self.advance();
                    Token::LParen
                }
                ')' => {
                    self.advance();
                    Token::RParen
                }
                '\'' | '"' => self.lex_string(c)?,
                c if c.is_ascii_digit() || ((c == '+' || c == '-') && self.starts_number(1)) => {
                    self.lex_number()?
                }
                c if c.is_ascii_alphabetic() || c == '_' => self.lex_name(),
                other => {
                    return Err(crate::error::RunError::syntax(format!(
                        "unexpected character '{other}' at {range}"
                    )));
                }
            };
            tokens.push(PosToken { token, range });
        }
        Ok(tokens)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c == ' ' || c == '\n' || c == '\t' || c == '\r' => {
                    self.advance();
                }
                Some('#') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// True if, starting at `self.pos` (a `+`/`-`), a digit appears within
    /// `offset` characters — used to decide whether a leading sign begins a
    /// number token rather than being an unexpected character on its own
    /// (SimpleLang has no infix arithmetic operators, so a bare sign can
    /// only ever start a signed numeric literal).
    fn starts_number(&self, offset: usize) -> bool {
        self.peek_at(offset).is_some_and(|c| c.is_ascii_digit())
    }

    fn lex_name(&mut self) -> Token {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }
        let name: String = self.chars[start..self.pos].iter().collect();
        Token::Name(name)
    }

    /// Attempts `FLOAT` before `INT` since both accept a leading sign
    /// (spec.md §4.1 ordering note).
    fn lex_number(&mut self) -> RunResult<Token> {
        let start = self.pos;
        if matches!(self.peek(), Some('+') | Some('-')) {
            self.advance();
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        let is_float = self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit());
        if is_float {
            self.advance(); // consume '.'
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
            let text: String = self.chars[start..self.pos].iter().collect();
            let value: f64 = text
                .parse()
                .map_err(|_| crate::error::RunError::syntax(format!("malformed float literal '{text}'")))?;
            Ok(Token::Float(value))
        } else {
            let text: String = self.chars[start..self.pos].iter().collect();
            let value: i64 = text
                .parse()
                .map_err(|_| crate::error::RunError::syntax(format!("malformed int literal '{text}'")))?;
            Ok(Token::Int(value))
        }
    }

    fn lex_string(&mut self, quote: char) -> RunResult<Token> {
        let start_range = self.here();
        self.advance(); // opening quote
        let mut out = String::new();
        loop {
            match self.advance() {
                None => {
                    return Err(crate::error::RunError::syntax(format!(
                        "unterminated string literal starting at {start_range}"
                    )));
                }
                Some(c) if c == quote => break,
                Some('\\') => {
                    let escaped = self.advance().ok_or_else(|| {
                        crate::error::RunError::syntax(format!(
                            "unterminated escape sequence starting at {start_range}"
                        ))
                    })?;
                    let resolved = match escaped {
                        '\\' => '\\',
                        'n' => '\n',
                        'r' => '\r',
                        '0' => '\0',
                        't' => '\t',
                        'a' => '\u{7}',
                        'b' => '\u{8}',
                        '\'' => '\'',
                        '"' => '"',
                        other => {
                            return Err(crate::error::RunError::syntax(format!(
                                "unknown escape sequence '\\{other}' at {start_range}"
                            )));
                        }
                    };
                    out.push(resolved);
                }
                Some(c) => out.push(c),
            }
        }
        Ok(Token::Str(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(src: &str) -> Vec<Token> {
        lex(src).unwrap().into_iter().map(|p| p.token).collect()
    }

    #[test]
    fn lexes_literal_tokens() {
        assert_eq!(toks("$()"), vec![Token::Dollar, Token::LParen, Token::RParen]);
    }

    #[test]
    fn lexes_name_int_float() {
        assert_eq!(
            toks("foo 12 3.5 -4 -2.25"),
            vec![
                Token::Name("foo".to_owned()),
                Token::Int(12),
                Token::Float(3.5),
                Token::Int(-4),
                Token::Float(-2.25),
            ]
        );
    }

    #[test]
    fn lexes_strings_with_escapes() {
        assert_eq!(toks(r"'a\nb'"), vec![Token::Str("a\nb".to_owned())]);
        assert_eq!(toks(r#""say \"hi\"""#), vec![Token::Str("say \"hi\"".to_owned())]);
        assert_eq!(toks(r"'it\'s'"), vec![Token::Str("it's".to_owned())]);
    }

    #[test]
    fn skips_comments_and_whitespace() {
        assert_eq!(toks("  # a comment\n  foo  "), vec![Token::Name("foo".to_owned())]);
    }

    #[test]
    fn rejects_unknown_character() {
        assert!(lex("@").is_err());
    }

    #[test]
    fn rejects_unterminated_string() {
        assert!(lex("'abc").is_err());
    }
}
