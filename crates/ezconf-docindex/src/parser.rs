//! Reader for the `var searchData=[...];` literal.
//!
//! Only the subset the generator emits is accepted: nested arrays, quoted
//! strings with backslash escapes, and integers. A trailing comma before `]`
//! is tolerated.

use crate::error::IndexError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Literal {
    List(Vec<Literal>),
    Str(String),
    Int(i64),
}

/// Parse a whole data file: optional `var <name> =`, one literal, optional `;`.
pub(crate) fn parse_document(src: &str) -> Result<Literal, IndexError> {
    let mut cursor = Cursor { src, pos: 0 };

    cursor.skip_ws();
    if cursor.eat("var") {
        cursor.skip_ws();
        let name_len = cursor
            .rest()
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
            .unwrap_or(cursor.rest().len());
        if name_len == 0 {
            return Err(cursor.error("expected variable name after `var`"));
        }
        cursor.pos += name_len;
        cursor.skip_ws();
        if !cursor.eat("=") {
            return Err(cursor.error("expected `=` after variable name"));
        }
    }

    let value = cursor.value()?;
    cursor.skip_ws();
    cursor.eat(";");
    cursor.skip_ws();
    if cursor.peek().is_some() {
        return Err(cursor.error("trailing characters after literal"));
    }
    Ok(value)
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn error(&self, message: impl Into<String>) -> IndexError {
        let before = &self.src[..self.pos];
        let line = before.matches('\n').count() + 1;
        let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
        IndexError::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    fn value(&mut self) -> Result<Literal, IndexError> {
        self.skip_ws();
        match self.peek() {
            Some('[') => self.list(),
            Some(q @ ('\'' | '"')) => self.string(q).map(Literal::Str),
            Some(c) if c == '-' || c.is_ascii_digit() => self.int(),
            Some(c) => Err(self.error(format!("unexpected character {c:?}"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn list(&mut self) -> Result<Literal, IndexError> {
        self.bump();
        let mut items = Vec::new();
        self.skip_ws();
        if self.eat("]") {
            return Ok(Literal::List(items));
        }
        loop {
            items.push(self.value()?);
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.bump();
                    self.skip_ws();
                    if self.eat("]") {
                        break;
                    }
                }
                Some(']') => {
                    self.bump();
                    break;
                }
                Some(c) => return Err(self.error(format!("expected `,` or `]`, found {c:?}"))),
                None => return Err(self.error("unterminated list")),
            }
        }
        Ok(Literal::List(items))
    }

    fn string(&mut self, quote: char) -> Result<String, IndexError> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('u') => out.push(self.hex_escape(4, 'u')?),
                    Some('x') => out.push(self.hex_escape(2, 'x')?),
                    Some(other) => out.push(other),
                    None => return Err(self.error("unterminated escape")),
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn hex_escape(&mut self, digits: usize, marker: char) -> Result<char, IndexError> {
        let hex = self
            .rest()
            .get(..digits)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| self.error(format!("expected {digits} hex digits after \\{marker}")))?;
        let code = u32::from_str_radix(hex, 16)
            .map_err(|e| self.error(format!("bad hex escape: {e}")))?;
        self.pos += digits;
        char::from_u32(code).ok_or_else(|| self.error(format!("invalid code point {code:#x}")))
    }

    fn int(&mut self) -> Result<Literal, IndexError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        self.src[start..self.pos]
            .parse()
            .map(Literal::Int)
            .map_err(|e| self.error(format!("bad integer: {e}")))
    }
}
