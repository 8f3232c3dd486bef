//! Per-file import tables.

use serde::Serialize;
use syncmock_core::lang::conventions::{self, BLANK_IDENT};
use syncmock_syntax::ast::ImportSpec;

/// Alias used for dot imports (`import . "strings"`); such entries never qualify anything.
pub const DOT_ALIAS: &str = ".";

/// One visible import: the name a file uses for a package, and the package's path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportEntry {
    pub alias: String,
    pub path: String,
}

/// Ordered `(alias, path)` pairs of one source file. Aliases are unique; the first spec wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportTable {
    entries: Vec<ImportEntry>,
}

impl ImportTable {
    /// Build a table from parsed import specs.
    ///
    /// Blank imports are dropped; unaliased imports use the default alias of their path.
    pub fn from_specs<'a>(specs: impl IntoIterator<Item = &'a ImportSpec>) -> Self {
        let mut table = Self::default();
        for spec in specs {
            let alias = match spec.alias.as_deref() {
                Some(BLANK_IDENT) => continue,
                Some(alias) => alias.to_string(),
                None => conventions::default_import_alias(&spec.path),
            };
            table.insert(alias, spec.path.clone());
        }
        table
    }

    /// Add an entry unless the alias is already taken. Returns whether it was added.
    pub fn insert(&mut self, alias: String, path: String) -> bool {
        if self.entries.iter().any(|e| e.alias == alias) {
            tracing::debug!(%alias, %path, "duplicate import alias ignored");
            return false;
        }
        self.entries.push(ImportEntry { alias, path });
        true
    }

    /// Resolved path for `alias`.
    pub fn path_for(&self, alias: &str) -> Option<&str> {
        if alias == DOT_ALIAS {
            return None;
        }
        self.entries.iter().find(|e| e.alias == alias).map(|e| e.path.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImportEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
