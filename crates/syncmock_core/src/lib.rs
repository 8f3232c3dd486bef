//! Provide shared, pure vocabulary and naming helpers for the syncmock generator.
//!
//! This crate is intentionally small and dependency-free. It contains deterministic helpers that both the syntax
//! frontend (lexer/parser) and the generator (resolver/qualifier/renderer) use, so that questions like "is this a
//! keyword?", "is this a predeclared type?" or "is this identifier exported?" have exactly one answer.
//!
//! ## Notes
//!
//! - **No IO**, no global state, and no AST types.
//! - Vocabulary identity (keywords, punctuation, predeclared types) lives in [`lang`].

pub mod lang;
