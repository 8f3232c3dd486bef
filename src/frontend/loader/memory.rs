//! In-memory source loader.

use std::collections::BTreeMap;

use syncmock_core::lang::conventions::LOCAL_IMPORT_PATH;

use super::{LoadedPackage, SourceLoader};
use crate::errors::GenerateError;

/// Serves packages from sources registered up front.
///
/// ## Examples
/// ```rust
/// use syncmock::frontend::loader::{MemoryLoader, SourceLoader};
///
/// let loader = MemoryLoader::new("example.com/app")
///     .with_file("example.com/app", "ops.go", "package app\ntype Ops interface { Do() }\n");
/// let pkg = loader.load(".").unwrap();
/// assert_eq!(pkg.name, "app");
/// assert_eq!(pkg.path, "example.com/app");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    /// Import path that `"."` refers to
    local_path: String,
    packages: BTreeMap<String, Vec<(String, String)>>,
}

impl MemoryLoader {
    pub fn new(local_path: impl Into<String>) -> Self {
        Self {
            local_path: local_path.into(),
            packages: BTreeMap::new(),
        }
    }

    /// Register a file of the package at `import_path`.
    pub fn with_file(mut self, import_path: &str, file_name: &str, source: &str) -> Self {
        self.add_file(import_path, file_name, source);
        self
    }

    pub fn add_file(&mut self, import_path: &str, file_name: &str, source: &str) {
        self.packages
            .entry(import_path.to_string())
            .or_default()
            .push((file_name.to_string(), source.to_string()));
    }

    pub fn local_path(&self) -> &str {
        &self.local_path
    }
}

impl SourceLoader for MemoryLoader {
    #[tracing::instrument(skip(self))]
    fn load(&self, import_path: &str) -> Result<LoadedPackage, GenerateError> {
        let path = if import_path == LOCAL_IMPORT_PATH {
            self.local_path.as_str()
        } else {
            import_path
        };
        let Some(sources) = self.packages.get(path) else {
            return Err(GenerateError::PackageNotFound {
                path: import_path.to_string(),
                context: "no such package registered".to_string(),
            });
        };
        LoadedPackage::from_sources(path, None, sources.clone(), path == self.local_path)
    }
}
