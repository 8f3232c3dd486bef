//! Generated artifacts and their persistence boundary.
//!
//! The pipeline only produces a [`GeneratedArtifact`]; writing it is left to an [`ArtifactWriter`], so callers can
//! write to disk, collect in memory, or print.

use std::collections::BTreeMap;
use std::path::PathBuf;

use syncmock_core::lang::conventions::{self, TEST_PACKAGE_SUFFIX};

/// Extension of Go source files.
const GO_EXTENSION: &str = ".go";

/// A rendered mock and the file name it should be written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub file_name: String,
    pub source: String,
}

/// Persists generated files.
pub trait ArtifactWriter {
    fn write(&mut self, file_name: &str, contents: &[u8]) -> std::io::Result<()>;
}

/// Writes into a directory.
#[derive(Debug, Clone)]
pub struct FsWriter {
    dir: PathBuf,
}

impl FsWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path a file name resolves to.
    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl ArtifactWriter for FsWriter {
    fn write(&mut self, file_name: &str, contents: &[u8]) -> std::io::Result<()> {
        let path = self.path_of(file_name);
        tracing::debug!(path = %path.display(), bytes = contents.len(), "writing artifact");
        std::fs::write(path, contents)
    }
}

/// Collects written files in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<&[u8]> {
        self.files.get(file_name).map(Vec::as_slice)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl ArtifactWriter for MemoryWriter {
    fn write(&mut self, file_name: &str, contents: &[u8]) -> std::io::Result<()> {
        self.files.insert(file_name.to_string(), contents.to_vec());
        Ok(())
    }
}

impl GeneratedArtifact {
    /// Hand the artifact to `writer`.
    pub fn write_to(&self, writer: &mut dyn ArtifactWriter) -> std::io::Result<()> {
        writer.write(&self.file_name, self.source.as_bytes())
    }
}

/// Output file name for `mock_name`.
///
/// `<source stem>_<snake mock name>.go` when generation was triggered from a file (a trailing `_test` on the stem
/// is dropped), `<snake mock name>.go` otherwise. `_test` is inserted before `.go` when the output package is an
/// external test package.
///
/// ## Examples
/// ```rust
/// use syncmock::backend::artifact::output_file_name;
///
/// assert_eq!(output_file_name("OpsImp", Some("ops.go"), "app"), "ops_ops_imp.go");
/// assert_eq!(output_file_name("OpsImp", Some("ops_test.go"), "app_test"), "ops_ops_imp_test.go");
/// assert_eq!(output_file_name("HTTPClientImp", None, "app"), "http_client_imp.go");
/// ```
pub fn output_file_name(mock_name: &str, source_file: Option<&str>, output_package: &str) -> String {
    let snake = conventions::to_snake_case(mock_name);
    let stem = source_file
        .map(|file| {
            let base = file.rsplit(['/', '\\']).next().unwrap_or(file);
            let base = base.strip_suffix(GO_EXTENSION).unwrap_or(base);
            base.strip_suffix(TEST_PACKAGE_SUFFIX).unwrap_or(base)
        })
        .filter(|stem| !stem.is_empty());

    let mut name = match stem {
        Some(stem) => format!("{stem}_{snake}"),
        None => snake,
    };
    if output_package.ends_with(TEST_PACKAGE_SUFFIX) {
        name.push_str(TEST_PACKAGE_SUFFIX);
    }
    name.push_str(GO_EXTENSION);
    name
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_nested_source() {
        assert_eq!(output_file_name("StoreImp", Some("internal/store.go"), "store"), "store_store_imp.go");
    }

    #[test]
    fn test_file_name_without_source() {
        assert_eq!(output_file_name("StoreImp", None, "store_test"), "store_imp_test.go");
    }

    #[test]
    fn test_memory_writer_collects() {
        let artifact = GeneratedArtifact {
            file_name: "a.go".to_string(),
            source: "package a\n".to_string(),
        };
        let mut writer = MemoryWriter::new();
        artifact.write_to(&mut writer).unwrap();
        assert_eq!(writer.get("a.go"), Some("package a\n".as_bytes()));
        assert_eq!(writer.file_names().collect::<Vec<_>>(), vec!["a.go"]);
    }

    #[test]
    fn test_fs_writer_writes_into_dir() {
        let dir = std::env::temp_dir().join(format!("syncmock-writer-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut writer = FsWriter::new(&dir);
        writer.write("x.go", b"package x\n").unwrap();
        assert_eq!(std::fs::read_to_string(dir.join("x.go")).unwrap(), "package x\n");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
