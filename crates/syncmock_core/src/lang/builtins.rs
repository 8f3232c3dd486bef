//! Predeclared functions and constants.
//!
//! Besides its types, Go's universe block declares builtin functions (`make`, `panic`, ...), the constants `true`,
//! `false` and `iota`, and the zero value `nil`. None of them are keywords: a parameter may be named `make` and
//! shadow the builtin for the rest of the function. Generated code that calls a builtin therefore has to keep
//! parameters from taking its name.
//!
//! ## Examples
//! ```rust
//! use syncmock_core::lang::builtins::{self, BuiltinId, BuiltinKind};
//!
//! assert_eq!(builtins::from_str("make"), Some(BuiltinId::Make));
//! assert_eq!(builtins::as_str(BuiltinId::Nil), "nil");
//! assert_eq!(builtins::kind(BuiltinId::True), BuiltinKind::Constant);
//! ```

use super::registry::Since;

/// Stable identifier for a predeclared function or constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinId {
    // Functions
    Append,
    Cap,
    Clear,
    Close,
    Complex,
    Copy,
    Delete,
    Imag,
    Len,
    Make,
    Max,
    Min,
    New,
    Panic,
    Print,
    Println,
    Real,
    Recover,

    // Constants
    True,
    False,
    Iota,

    // Zero value
    Nil,
}

/// What a builtin denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    Function,
    Constant,
    ZeroValue,
}

/// Metadata for a builtin.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinInfo {
    pub id: BuiltinId,
    pub canonical: &'static str,
    pub kind: BuiltinKind,
    pub since: Since,
}

/// Registry of predeclared functions and constants.
pub const BUILTINS: &[BuiltinInfo] = &[
    func(BuiltinId::Append, "append"),
    func(BuiltinId::Cap, "cap"),
    BuiltinInfo {
        id: BuiltinId::Clear,
        canonical: "clear",
        kind: BuiltinKind::Function,
        since: Since(1, 21),
    },
    func(BuiltinId::Close, "close"),
    func(BuiltinId::Complex, "complex"),
    func(BuiltinId::Copy, "copy"),
    func(BuiltinId::Delete, "delete"),
    func(BuiltinId::Imag, "imag"),
    func(BuiltinId::Len, "len"),
    func(BuiltinId::Make, "make"),
    BuiltinInfo {
        id: BuiltinId::Max,
        canonical: "max",
        kind: BuiltinKind::Function,
        since: Since(1, 21),
    },
    BuiltinInfo {
        id: BuiltinId::Min,
        canonical: "min",
        kind: BuiltinKind::Function,
        since: Since(1, 21),
    },
    func(BuiltinId::New, "new"),
    func(BuiltinId::Panic, "panic"),
    func(BuiltinId::Print, "print"),
    func(BuiltinId::Println, "println"),
    func(BuiltinId::Real, "real"),
    func(BuiltinId::Recover, "recover"),
    constant(BuiltinId::True, "true"),
    constant(BuiltinId::False, "false"),
    constant(BuiltinId::Iota, "iota"),
    BuiltinInfo {
        id: BuiltinId::Nil,
        canonical: "nil",
        kind: BuiltinKind::ZeroValue,
        since: Since::GO1,
    },
];

/// Canonical spelling.
pub fn as_str(id: BuiltinId) -> &'static str {
    info_for(id).canonical
}

/// What the builtin denotes.
pub fn kind(id: BuiltinId) -> BuiltinKind {
    info_for(id).kind
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: BuiltinId) -> &'static BuiltinInfo {
    BUILTINS.iter().find(|b| b.id == id).expect("builtin info missing")
}

/// Lookup by spelling.
pub fn from_str(s: &str) -> Option<BuiltinId> {
    BUILTINS.iter().find(|b| b.canonical == s).map(|b| b.id)
}

const fn func(id: BuiltinId, canonical: &'static str) -> BuiltinInfo {
    BuiltinInfo {
        id,
        canonical,
        kind: BuiltinKind::Function,
        since: Since::GO1,
    }
}

const fn constant(id: BuiltinId, canonical: &'static str) -> BuiltinInfo {
    BuiltinInfo {
        id,
        canonical,
        kind: BuiltinKind::Constant,
        since: Since::GO1,
    }
}
