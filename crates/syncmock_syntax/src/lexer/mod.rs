//! Lexer for Go source files
//!
//! Handles tokenization including:
//! - Keywords and identifiers (Unicode letters allowed)
//! - Numeric, rune and string literals (interpreted and raw)
//! - Operators and punctuation, by maximal munch over the punctuation registry
//! - Line and block comments
//! - Automatic semicolon insertion at line ends
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `literals` - String/rune/number scanning

mod literals;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::CompileError;
use syncmock_core::lang::punctuation::{self, PunctuationId};

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
// Semicolon insertion (simplified):
//
// [token] → '\n' or EOF → last token ends a statement? → emit ';'
//                                                ↓ no
//                                              nothing
// A block comment spanning lines behaves like a newline.
// ============================================================================

/// Lexer for Go source code.
///
/// Converts source text into a stream of tokens. Comments are dropped; newlines only survive as the semicolons
/// inserted after statement-ending tokens.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        };
        if lexer.peek() == Some('\u{feff}') {
            lexer.advance();
        }
        lexer
    }

    /// Tokenize the entire source code.
    ///
    /// Returns a vector of tokens on success, or a vector of errors on failure.
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<CompileError>> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.insert_semicolon(self.current_pos);
        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
        ));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' || c == '\r' {
                self.advance();
            } else {
                break;
            }
        }

        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            '\n' => self.insert_semicolon(start),

            '/' if self.peek() == Some('/') => self.skip_line_comment(),
            '/' if self.peek() == Some('*') => self.skip_block_comment(start),

            '"' => self.scan_string(start),
            '`' => self.scan_raw_string(start),
            '\'' => self.scan_rune(start),

            '0'..='9' => self.scan_number(start),
            '.' if self.peek().is_some_and(|n| n.is_ascii_digit()) => self.scan_number(start),

            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => self.scan_punctuation(start, c),
        }
    }

    /// Emit a `;` at `pos` when the previous token ends a statement.
    fn insert_semicolon(&mut self, pos: usize) {
        if self.tokens.last().is_some_and(|t| t.kind.ends_statement()) {
            self.tokens.push(Token::new(
                TokenKind::Punctuation(PunctuationId::Semicolon),
                Span::new(pos, pos),
            ));
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn error(&mut self, message: String, start: usize) {
        self.errors
            .push(CompileError::new(message, Span::new(start, self.current_pos.max(start + 1))));
    }

    // ========================================================================
    // Comments
    // ========================================================================

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self, start: usize) {
        // consume '*'
        self.advance();
        let mut saw_newline = false;
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    break;
                }
                Some('\n') => saw_newline = true,
                Some(_) => {}
                None => {
                    self.error("comment not terminated".to_string(), start);
                    return;
                }
            }
        }
        if saw_newline {
            self.insert_semicolon(start);
        }
    }

    // ========================================================================
    // Identifiers and punctuation
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }
        let text = &self.source[start..self.current_pos];
        let kind = match keyword_id(text) {
            Some(id) => TokenKind::Keyword(id),
            None => TokenKind::Ident(text.to_string()),
        };
        self.add_token(kind, start);
    }

    fn scan_punctuation(&mut self, start: usize, c: char) {
        match punctuation::longest_match(&self.source[start..]) {
            Some(id) => {
                // The first character is already consumed; registry spellings are ASCII.
                for _ in 1..punctuation::as_str(id).len() {
                    self.advance();
                }
                self.add_token(TokenKind::Punctuation(id), start);
            }
            None => self.error(format!("Unexpected character '{c}'"), start),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Convenience function to tokenize source code.
#[tracing::instrument(skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<CompileError>> {
    Lexer::new(source).tokenize()
}
