//! Define the reserved keyword vocabulary of Go.
//!
//! This module is the single source of truth for reserved words: a stable identifier ([`KeywordId`]) plus a const
//! metadata table ([`KEYWORDS`]) that records canonical spellings and categories.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** (`Type` is an identifier, `type` is a keyword).
//! - Only a handful of keywords carry meaning for declaration-level parsing; the rest still have to be recognised so
//!   that automatic semicolon insertion (`break`, `return`, ...) and body skipping behave.
//!
//! ## Examples
//! ```rust
//! use syncmock_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("func"), Some(KeywordId::Func));
//! assert_eq!(keywords::from_str("Func"), None);
//! assert!(keywords::ends_statement(KeywordId::Return));
//! ```

use super::registry::Since;

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Declarations
    Package,
    Import,
    Type,
    Func,
    Var,
    Const,

    // Type constructors
    Interface,
    Struct,
    Map,
    Chan,

    // Control flow
    If,
    Else,
    For,
    Range,
    Switch,
    Case,
    Default,
    Select,
    Break,
    Continue,
    Fallthrough,
    Return,
    Goto,
    Go,
    Defer,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Declaration,
    TypeConstructor,
    ControlFlow,
}

/// Metadata for a keyword.
///
/// ## Notes
/// - `ends_statement` marks the keywords after which the lexer inserts a semicolon at end of line.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub ends_statement: bool,
    pub since: Since,
}

/// Registry of all keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Declarations
    info(KeywordId::Package, "package", KeywordCategory::Declaration),
    info(KeywordId::Import, "import", KeywordCategory::Declaration),
    info(KeywordId::Type, "type", KeywordCategory::Declaration),
    info(KeywordId::Func, "func", KeywordCategory::Declaration),
    info(KeywordId::Var, "var", KeywordCategory::Declaration),
    info(KeywordId::Const, "const", KeywordCategory::Declaration),
    // Type constructors
    info(KeywordId::Interface, "interface", KeywordCategory::TypeConstructor),
    info(KeywordId::Struct, "struct", KeywordCategory::TypeConstructor),
    info(KeywordId::Map, "map", KeywordCategory::TypeConstructor),
    info(KeywordId::Chan, "chan", KeywordCategory::TypeConstructor),
    // Control flow
    info(KeywordId::If, "if", KeywordCategory::ControlFlow),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow),
    info(KeywordId::Range, "range", KeywordCategory::ControlFlow),
    info(KeywordId::Switch, "switch", KeywordCategory::ControlFlow),
    info(KeywordId::Case, "case", KeywordCategory::ControlFlow),
    info(KeywordId::Default, "default", KeywordCategory::ControlFlow),
    info(KeywordId::Select, "select", KeywordCategory::ControlFlow),
    terminator(KeywordId::Break, "break"),
    terminator(KeywordId::Continue, "continue"),
    terminator(KeywordId::Fallthrough, "fallthrough"),
    terminator(KeywordId::Return, "return"),
    info(KeywordId::Goto, "goto", KeywordCategory::ControlFlow),
    info(KeywordId::Go, "go", KeywordCategory::ControlFlow),
    info(KeywordId::Defer, "defer", KeywordCategory::ControlFlow),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Whether a line ending right after this keyword gets an automatic semicolon.
pub fn ends_statement(id: KeywordId) -> bool {
    info_for(id).ends_statement
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if `s` is a reserved word, `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

/// Whether `s` is a reserved word (and therefore not usable as a parameter or field name).
pub fn is_keyword(s: &str) -> bool {
    from_str(s).is_some()
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        ends_statement: false,
        since: Since::GO1,
    }
}

const fn terminator(id: KeywordId, canonical: &'static str) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category: KeywordCategory::ControlFlow,
        ends_statement: true,
        since: Since::GO1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keyword_round_trips() {
        for k in KEYWORDS {
            assert_eq!(from_str(k.canonical), Some(k.id));
            assert_eq!(as_str(k.id), k.canonical);
        }
    }

    #[test]
    fn test_go_has_25_keywords() {
        assert_eq!(KEYWORDS.len(), 25);
    }

    #[test]
    fn test_predeclared_names_are_not_keywords() {
        for name in ["string", "error", "any", "true", "nil", "len"] {
            assert!(!is_keyword(name), "{name} must lex as an identifier");
        }
    }

    #[test]
    fn test_terminating_keywords() {
        let terminators: Vec<_> = KEYWORDS.iter().filter(|k| k.ends_statement).map(|k| k.canonical).collect();
        assert_eq!(terminators, vec!["break", "continue", "fallthrough", "return"]);
        assert_eq!(category(KeywordId::Chan), KeywordCategory::TypeConstructor);
    }
}
