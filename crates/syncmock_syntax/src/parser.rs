//! Parser for Go declarations
//!
//! Converts a token stream into a [`SourceFile`]: package clause, imports, type declarations and function/method
//! signatures. Function bodies and `var`/`const` declarations are skipped as balanced token runs.
//!
//! ## Examples
//!
//! ```rust
//! use syncmock_syntax::{lexer, parser};
//!
//! let source = "package calc\n\nfunc Add(a, b int) int { return a + b }\n";
//! let tokens = lexer::lex(source).unwrap();
//! let file = parser::parse(&tokens).unwrap();
//! assert_eq!(file.declarations[0].node.name(), "Add");
//! ```

use crate::ast::*;
use crate::diagnostics::CompileError;
use crate::lexer::{Token, TokenKind};
use syncmock_core::lang::keywords::KeywordId;
use syncmock_core::lang::punctuation::{self, PunctuationId};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
