//! Predeclared type vocabulary.
//!
//! Go's universe block declares a fixed set of type names (`int`, `string`, `error`, ...). These names never need a
//! package qualifier and are always accessible from any package, so both the type qualifier and the export
//! validator consult this registry before looking at capitalization.
//!
//! ## Examples
//! ```rust
//! use syncmock_core::lang::types::{self, PredeclaredKind};
//!
//! assert!(types::is_predeclared("error"));
//! assert_eq!(types::kind_of("uint16"), Some(PredeclaredKind::Integer));
//! assert!(!types::is_predeclared("Error"));
//! ```

use super::registry::Since;

/// Coarse classification of a predeclared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredeclaredKind {
    Boolean,
    Integer,
    Float,
    Complex,
    String,
    /// The `error` interface.
    Error,
    /// `any` and `comparable`.
    Constraint,
}

/// Metadata for a predeclared type.
#[derive(Debug, Clone, Copy)]
pub struct PredeclaredTypeInfo {
    pub name: &'static str,
    pub kind: PredeclaredKind,
    pub since: Since,
}

/// Registry of predeclared types.
pub const PREDECLARED_TYPES: &[PredeclaredTypeInfo] = &[
    info("bool", PredeclaredKind::Boolean),
    info("int", PredeclaredKind::Integer),
    info("int8", PredeclaredKind::Integer),
    info("int16", PredeclaredKind::Integer),
    info("int32", PredeclaredKind::Integer),
    info("int64", PredeclaredKind::Integer),
    info("uint", PredeclaredKind::Integer),
    info("uint8", PredeclaredKind::Integer),
    info("uint16", PredeclaredKind::Integer),
    info("uint32", PredeclaredKind::Integer),
    info("uint64", PredeclaredKind::Integer),
    info("uintptr", PredeclaredKind::Integer),
    info("byte", PredeclaredKind::Integer),
    info("rune", PredeclaredKind::Integer),
    info("float32", PredeclaredKind::Float),
    info("float64", PredeclaredKind::Float),
    info("complex64", PredeclaredKind::Complex),
    info("complex128", PredeclaredKind::Complex),
    info("string", PredeclaredKind::String),
    info("error", PredeclaredKind::Error),
    PredeclaredTypeInfo {
        name: "any",
        kind: PredeclaredKind::Constraint,
        since: Since::GENERICS,
    },
    PredeclaredTypeInfo {
        name: "comparable",
        kind: PredeclaredKind::Constraint,
        since: Since::GENERICS,
    },
];

/// The single method of the predeclared `error` interface.
pub const ERROR_METHOD: &str = "Error";

/// Classify a predeclared type name.
///
/// ## Returns
/// - `Some(kind)` for predeclared names, `None` for everything else (including shadowing-prone capitalized names).
pub fn kind_of(name: &str) -> Option<PredeclaredKind> {
    PREDECLARED_TYPES.iter().find(|t| t.name == name).map(|t| t.kind)
}

/// Whether `name` is a predeclared type.
pub fn is_predeclared(name: &str) -> bool {
    kind_of(name).is_some()
}

/// Whether `name` is one of the predeclared integer types.
pub fn is_integer(name: &str) -> bool {
    kind_of(name) == Some(PredeclaredKind::Integer)
}

/// Whether `name` is the predeclared `string` type.
pub fn is_string(name: &str) -> bool {
    kind_of(name) == Some(PredeclaredKind::String)
}

const fn info(name: &'static str, kind: PredeclaredKind) -> PredeclaredTypeInfo {
    PredeclaredTypeInfo {
        name,
        kind,
        since: Since::GO1,
    }
}
