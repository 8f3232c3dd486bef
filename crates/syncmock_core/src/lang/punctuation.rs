//! Punctuation and operator vocabulary.
//!
//! This module defines the canonical set of Go punctuation tokens: delimiters, separators, access markers and the
//! operators the lexer has to recognise to stay in sync inside function bodies it otherwise skips.
//!
//! ## Notes
//! - Lookup via [`from_str`] is exact.
//! - [`longest_match`] implements the maximal-munch rule used by the lexer.
//!
//! ## Examples
//! ```rust
//! use syncmock_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("<-"), Some(PunctuationId::Arrow));
//! assert_eq!(punctuation::longest_match("&^= x"), Some(PunctuationId::AndNotAssign));
//! ```

use super::registry::Since;

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets and braces.
    Delimiter,
    /// Separators like `,` `;` and `:`.
    Separator,
    /// Access marker `.`.
    Access,
    /// Markers with a fixed role in declarations (`...`, `~`, `<-`).
    Marker,
    /// Arithmetic, logical and comparison operators.
    Operator,
    /// Assignment forms (`=`, `:=`, `+=`, ...).
    Assignment,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    // Separators / access
    Comma,
    Semicolon,
    Colon,
    Dot,

    // Markers
    Ellipsis,
    Tilde,
    Arrow,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Shl,
    Shr,
    AndNot,
    AndAnd,
    OrOr,
    Inc,
    Dec,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Not,

    // Assignment
    Assign,
    Define,
    AddAssign,
    SubAssign,
    MulAssign,
    QuoAssign,
    RemAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    AndNotAssign,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
    /// A line ending right after this token gets an automatic semicolon.
    pub ends_statement: bool,
    pub since: Since,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    // Delimiters
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter),
    closer(PunctuationId::RParen, ")"),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter),
    closer(PunctuationId::RBracket, "]"),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter),
    closer(PunctuationId::RBrace, "}"),
    // Separators / access
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator),
    info(PunctuationId::Semicolon, ";", PunctuationCategory::Separator),
    info(PunctuationId::Colon, ":", PunctuationCategory::Separator),
    info(PunctuationId::Dot, ".", PunctuationCategory::Access),
    // Markers
    info(PunctuationId::Ellipsis, "...", PunctuationCategory::Marker),
    PunctuationInfo {
        id: PunctuationId::Tilde,
        canonical: "~",
        category: PunctuationCategory::Marker,
        ends_statement: false,
        since: Since::GENERICS,
    },
    info(PunctuationId::Arrow, "<-", PunctuationCategory::Marker),
    // Operators
    info(PunctuationId::Plus, "+", PunctuationCategory::Operator),
    info(PunctuationId::Minus, "-", PunctuationCategory::Operator),
    info(PunctuationId::Star, "*", PunctuationCategory::Operator),
    info(PunctuationId::Slash, "/", PunctuationCategory::Operator),
    info(PunctuationId::Percent, "%", PunctuationCategory::Operator),
    info(PunctuationId::Amp, "&", PunctuationCategory::Operator),
    info(PunctuationId::Pipe, "|", PunctuationCategory::Operator),
    info(PunctuationId::Caret, "^", PunctuationCategory::Operator),
    info(PunctuationId::Shl, "<<", PunctuationCategory::Operator),
    info(PunctuationId::Shr, ">>", PunctuationCategory::Operator),
    info(PunctuationId::AndNot, "&^", PunctuationCategory::Operator),
    info(PunctuationId::AndAnd, "&&", PunctuationCategory::Operator),
    info(PunctuationId::OrOr, "||", PunctuationCategory::Operator),
    closer(PunctuationId::Inc, "++"),
    closer(PunctuationId::Dec, "--"),
    info(PunctuationId::EqEq, "==", PunctuationCategory::Operator),
    info(PunctuationId::NotEq, "!=", PunctuationCategory::Operator),
    info(PunctuationId::Lt, "<", PunctuationCategory::Operator),
    info(PunctuationId::LtEq, "<=", PunctuationCategory::Operator),
    info(PunctuationId::Gt, ">", PunctuationCategory::Operator),
    info(PunctuationId::GtEq, ">=", PunctuationCategory::Operator),
    info(PunctuationId::Not, "!", PunctuationCategory::Operator),
    // Assignment
    info(PunctuationId::Assign, "=", PunctuationCategory::Assignment),
    info(PunctuationId::Define, ":=", PunctuationCategory::Assignment),
    info(PunctuationId::AddAssign, "+=", PunctuationCategory::Assignment),
    info(PunctuationId::SubAssign, "-=", PunctuationCategory::Assignment),
    info(PunctuationId::MulAssign, "*=", PunctuationCategory::Assignment),
    info(PunctuationId::QuoAssign, "/=", PunctuationCategory::Assignment),
    info(PunctuationId::RemAssign, "%=", PunctuationCategory::Assignment),
    info(PunctuationId::AndAssign, "&=", PunctuationCategory::Assignment),
    info(PunctuationId::OrAssign, "|=", PunctuationCategory::Assignment),
    info(PunctuationId::XorAssign, "^=", PunctuationCategory::Assignment),
    info(PunctuationId::ShlAssign, "<<=", PunctuationCategory::Assignment),
    info(PunctuationId::ShrAssign, ">>=", PunctuationCategory::Assignment),
    info(PunctuationId::AndNotAssign, "&^=", PunctuationCategory::Assignment),
];

/// Return the canonical spelling for a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Whether a line ending right after this token gets an automatic semicolon.
pub fn ends_statement(id: PunctuationId) -> bool {
    info_for(id).ends_statement
}

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("punctuation info missing")
}

/// Resolve a punctuation spelling to its identifier.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

/// Find the longest punctuation spelling that prefixes `input` (maximal munch).
///
/// ## Returns
/// - `Some(PunctuationId)` for the longest match, `None` if `input` does not start with punctuation.
pub fn longest_match(input: &str) -> Option<PunctuationId> {
    PUNCTUATION
        .iter()
        .filter(|p| input.starts_with(p.canonical))
        .max_by_key(|p| p.canonical.len())
        .map(|p| p.id)
}

const fn info(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo {
        id,
        canonical,
        category,
        ends_statement: false,
        since: Since::GO1,
    }
}

const fn closer(id: PunctuationId, canonical: &'static str) -> PunctuationInfo {
    let category = match id {
        PunctuationId::Inc | PunctuationId::Dec => PunctuationCategory::Operator,
        _ => PunctuationCategory::Delimiter,
    };
    PunctuationInfo {
        id,
        canonical,
        category,
        ends_statement: true,
        since: Since::GO1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spellings_are_unique() {
        for (i, a) in PUNCTUATION.iter().enumerate() {
            for b in &PUNCTUATION[i + 1..] {
                assert_ne!(a.canonical, b.canonical);
            }
        }
    }

    #[test]
    fn test_longest_match_prefers_longer_spellings() {
        assert_eq!(longest_match("<<= 1"), Some(PunctuationId::ShlAssign));
        assert_eq!(longest_match("<-chan"), Some(PunctuationId::Arrow));
        assert_eq!(longest_match("...int"), Some(PunctuationId::Ellipsis));
        assert_eq!(longest_match(".Name"), Some(PunctuationId::Dot));
        assert_eq!(longest_match("abc"), None);
    }

    #[test]
    fn test_closers_end_statements() {
        assert!(ends_statement(PunctuationId::RParen));
        assert!(ends_statement(PunctuationId::Inc));
        assert!(!ends_statement(PunctuationId::Comma));
        assert_eq!(category(PunctuationId::Inc), PunctuationCategory::Operator);
        assert_eq!(as_str(PunctuationId::Define), ":=");
    }
}
