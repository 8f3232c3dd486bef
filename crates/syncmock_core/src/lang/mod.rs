//! Go language vocabulary registries.
//!
//! This module is the "front door" for language-level vocabulary: reserved keywords, punctuation, predeclared types
//! and builtins, and the identifier conventions (exported names, import aliases) the generator relies on.
//!
//! The design goal is to avoid stringly-typed checks scattered across the lexer, parser and generator. Callers work
//! with **stable IDs** (e.g. `KeywordId`, `PunctuationId`) and look up spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use.
//!
//! ## Examples
//! ```rust
//! use syncmock_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("interface"), Some(KeywordId::Interface));
//! assert_eq!(keywords::as_str(KeywordId::Chan), "chan");
//! ```

pub mod builtins;
pub mod conventions;
pub mod keywords;
pub mod punctuation;
pub mod registry;
pub mod types;
