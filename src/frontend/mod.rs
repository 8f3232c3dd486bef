//! Generator frontend
//!
//! Everything between an import path and a resolved symbol:
//! - `loader`: finding and parsing packages (filesystem or in-memory)
//! - `imports`: per-file import tables
//! - `lower`: syntactic types to the resolved [`model::TypeExpr`]
//! - `signature`: parameter/result normalization and generated names
//! - `resolver`: target lookup and embedded-interface expansion
//! - `model`: the resolved, serializable symbol model

// Syntax components are provided by the shared syncmock_syntax crate.
pub use syncmock_syntax::{ast, diagnostics, lexer, parser};

pub mod imports;
pub mod loader;
pub mod lower;
pub mod model;
pub mod resolver;
pub mod signature;
