//! String, rune and number scanning.
//!
//! Interpreted strings are decoded (escapes resolved) because their values matter: import paths and struct tags.
//! Runes and numbers are kept as written; they only ever appear in skipped bodies or array lengths.

use super::{Lexer, TokenKind};

impl Lexer<'_> {
    /// Scan an interpreted string literal; the opening `"` is already consumed.
    pub(super) fn scan_string(&mut self, start: usize) {
        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.error("string literal not terminated".to_string(), start);
                    return;
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    if let Some(c) = self.scan_escape('"', start) {
                        value.push(c);
                    }
                }
                Some(c) => {
                    self.advance();
                    value.push(c);
                }
            }
        }
        self.add_token(TokenKind::String(value), start);
    }

    /// Scan a raw string literal; the opening backquote is already consumed. Carriage returns are discarded.
    pub(super) fn scan_raw_string(&mut self, start: usize) {
        let mut value = String::new();
        loop {
            match self.advance() {
                None => {
                    self.error("raw string literal not terminated".to_string(), start);
                    return;
                }
                Some('`') => break,
                Some('\r') => {}
                Some(c) => value.push(c),
            }
        }
        self.add_token(TokenKind::String(value), start);
    }

    /// Scan a rune literal; the opening `'` is already consumed.
    pub(super) fn scan_rune(&mut self, start: usize) {
        let mut count = 0usize;
        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.error("rune literal not terminated".to_string(), start);
                    return;
                }
                Some('\'') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    self.scan_escape('\'', start);
                    count += 1;
                }
                Some(_) => {
                    self.advance();
                    count += 1;
                }
            }
        }
        if count != 1 {
            self.error("rune literal must contain exactly one character".to_string(), start);
            return;
        }
        let text = self.source[start..self.current_pos].to_string();
        self.add_token(TokenKind::Rune(text), start);
    }

    /// Decode one escape sequence after a backslash.
    ///
    /// Byte escapes (`\x`, octal) above 0x7F are mapped to the Latin-1 code point, which is lossless for the ASCII
    /// content of import paths and tags.
    fn scan_escape(&mut self, quote: char, start: usize) -> Option<char> {
        let c = self.advance()?;
        let decoded = match c {
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{0b}',
            '\\' => '\\',
            _ if c == quote => quote,
            'x' => return self.scan_hex_escape(2, start),
            'u' => return self.scan_hex_escape(4, start),
            'U' => return self.scan_hex_escape(8, start),
            '0'..='7' => {
                let mut value = c.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            self.advance();
                            value = value * 8 + d;
                        }
                        None => {
                            self.error("invalid octal escape".to_string(), start);
                            return None;
                        }
                    }
                }
                return char::from_u32(value);
            }
            _ => {
                self.error(format!("unknown escape sequence '\\{c}'"), start);
                return None;
            }
        };
        Some(decoded)
    }

    fn scan_hex_escape(&mut self, digits: usize, start: usize) -> Option<char> {
        let mut value = 0u32;
        for _ in 0..digits {
            match self.peek().and_then(|d| d.to_digit(16)) {
                Some(d) => {
                    self.advance();
                    value = value * 16 + d;
                }
                None => {
                    self.error("invalid hexadecimal escape".to_string(), start);
                    return None;
                }
            }
        }
        let decoded = char::from_u32(value);
        if decoded.is_none() {
            self.error("escape sequence is an invalid Unicode code point".to_string(), start);
        }
        decoded
    }

    /// Scan a numeric literal; the first character (digit or `.`) is already consumed.
    ///
    /// Digits, letters, `_` and `.` are accepted loosely; a sign is only part of the literal right after an
    /// exponent marker (`e` for decimal, `p` for hexadecimal).
    pub(super) fn scan_number(&mut self, start: usize) {
        let rest = &self.source[start..];
        let hex = rest.starts_with("0x") || rest.starts_with("0X");
        let mut prev = rest.chars().next().unwrap_or('0');
        while let Some(c) = self.peek() {
            let exponent_sign = (c == '+' || c == '-')
                && if hex {
                    matches!(prev, 'p' | 'P')
                } else {
                    matches!(prev, 'e' | 'E')
                };
            let continues = c.is_ascii_alphanumeric() || c == '_' || (c == '.' && self.peek_next() != Some('.'));
            if continues || exponent_sign {
                self.advance();
                prev = c;
            } else {
                break;
            }
        }
        let text = self.source[start..self.current_pos].to_string();
        self.add_token(TokenKind::Number(text), start);
    }
}
