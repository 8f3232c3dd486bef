//! Declaration-level Go syntax frontend for syncmock: lexer, parser, AST, diagnostics.
//!
//! The parser understands everything that can appear in a declaration (package clause, imports, type
//! declarations, function and method signatures, the full type grammar including generics) and skips what cannot
//! influence a mock: function bodies and `var`/`const` initializers are consumed as balanced token runs.
//!
//! ## Notes
//! - This crate is "syntax-only": it does not resolve imports or decide what a name refers to.
//! - Vocabulary identity (keywords/punctuation/predeclared types) comes from `syncmock_core::lang`.
//!
//! ## Examples
//! ```rust
//! use syncmock_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("package store\n\ntype Store interface { Get(key string) ([]byte, error) }\n").unwrap();
//! let file = parser::parse(&tokens).unwrap();
//! assert_eq!(file.package.node, "store");
//! assert_eq!(file.declarations.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
