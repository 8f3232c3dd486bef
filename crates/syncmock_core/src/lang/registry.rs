//! Shareable metadata for `syncmock_core::lang` registries.
//!
//! This submodule provides the small, dependency-free metadata types that are reused across all registries.
//!
//! ## Notes
//! - These types are intentionally lightweight and `Copy`-friendly so registries can live in `const` tables.
//! - Metadata is meant for tooling and diagnostics; enforcement of syntax rules still lives in the lexer/parser.

/// Go release a vocabulary item is available since, as `(major, minor)`.
///
/// ## Examples
/// ```rust
/// use syncmock_core::lang::registry::Since;
///
/// let generics = Since(1, 18);
/// assert!(generics >= Since(1, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Since(pub u8, pub u8);

impl Since {
    /// The first stable Go release.
    pub const GO1: Since = Since(1, 0);
    /// The release that introduced type parameters (`any`, `comparable`, `~T` terms).
    pub const GENERICS: Since = Since(1, 18);
}

impl std::fmt::Display for Since {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "go{}.{}", self.0, self.1)
    }
}
