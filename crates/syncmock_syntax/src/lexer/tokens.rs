//! Token types for the Go lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Punctuation(PunctuationId)` for delimiters and operators
//!
//! ## Notes
//! - Semicolons inserted by the automatic-semicolon rule are ordinary `Punctuation(Semicolon)` tokens with an empty
//!   span at the end of the line.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::ast::Span;
use syncmock_core::lang::keywords::{self, KeywordId};
use syncmock_core::lang::punctuation::PunctuationId;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Ident(String),
    /// Numeric literal, kept as written (`0x1F`, `1_000`, `2.5e3`, `3i`)
    Number(String),
    /// Rune literal, kept as written including quotes
    Rune(String),
    /// Interpreted or raw string literal, with escapes decoded
    String(String),

    // ========== Special ==========
    Eof,
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
