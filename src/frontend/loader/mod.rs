//! Source loading: turning an import path into parsed Go files.
//!
//! The resolver only sees the [`SourceLoader`] trait. [`FsLoader`] reads real packages from a module, `vendor/`, the
//! module cache, `GOROOT` and `GOPATH`; [`MemoryLoader`] serves packages assembled in memory (tests, embedding).
//!
//! Both build packages through [`LoadedPackage::from_sources`], so file filtering and package selection behave the
//! same regardless of where the text came from.

mod fs;
pub mod gomod;
mod memory;

use std::collections::HashMap;
use std::path::PathBuf;

use syncmock_core::lang::conventions::TEST_PACKAGE_SUFFIX;
use syncmock_syntax::ast::SourceFile;
use syncmock_syntax::parser;

use super::imports::ImportTable;
use crate::errors::GenerateError;

pub use fs::FsLoader;
pub use memory::MemoryLoader;

/// Suffix of Go test files.
const TEST_FILE_SUFFIX: &str = "_test.go";

/// Supplies parsed packages by import path.
///
/// `"."` denotes the package in the invocation directory; every other argument is an import path.
pub trait SourceLoader {
    fn load(&self, import_path: &str) -> Result<LoadedPackage, GenerateError>;
}

/// One parsed file of a package.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    /// File name (no directory)
    pub name: String,
    pub source: String,
    pub ast: SourceFile,
    pub imports: ImportTable,
}

/// A parsed package.
#[derive(Debug, Clone)]
pub struct LoadedPackage {
    /// Import path; `"."` when the local package has no known module path
    pub path: String,
    /// Package clause name
    pub name: String,
    /// Directory the files were read from, when loaded from disk
    pub dir: Option<PathBuf>,
    /// Files sorted by name
    pub files: Vec<LoadedFile>,
}

impl LoadedPackage {
    /// Assemble a package from raw `(file name, source)` pairs.
    ///
    /// - Files constrained by `//go:build ignore` are dropped.
    /// - For non-local packages `_test.go` files are dropped, and files that fail to parse are skipped with a
    ///   warning. Local parse failures are errors.
    /// - When files disagree on the package clause, the most common non-`_test` package wins; an external test
    ///   package is used only when it is the only one.
    ///
    /// ## Errors
    /// - `GenerateError::Syntax` for a local file that fails to parse.
    /// - `GenerateError::PackageNotFound` when no usable Go file remains.
    pub fn from_sources(
        path: &str,
        dir: Option<PathBuf>,
        mut sources: Vec<(String, String)>,
        local: bool,
    ) -> Result<Self, GenerateError> {
        sources.sort_by(|a, b| a.0.cmp(&b.0));

        let mut files = Vec::with_capacity(sources.len());
        for (name, source) in sources {
            if !local && name.ends_with(TEST_FILE_SUFFIX) {
                continue;
            }
            if has_ignore_constraint(&source) {
                tracing::debug!(file = %name, "skipping file with ignore build constraint");
                continue;
            }
            let ast = match parser::parse_source(&source) {
                Ok(ast) => ast,
                Err(errors) if local => {
                    return Err(GenerateError::Syntax {
                        file: name,
                        contents: source,
                        errors,
                    });
                }
                Err(errors) => {
                    tracing::warn!(package = %path, file = %name, errors = errors.len(), "skipping unparsable file");
                    continue;
                }
            };
            let imports = ImportTable::from_specs(ast.imports.iter().map(|s| &s.node));
            files.push(LoadedFile {
                name,
                source,
                ast,
                imports,
            });
        }

        let Some(name) = choose_package_name(&files) else {
            return Err(GenerateError::PackageNotFound {
                path: path.to_string(),
                context: "no Go files".to_string(),
            });
        };
        files.retain(|f| {
            let keep = f.ast.package.node == name;
            if !keep {
                tracing::debug!(file = %f.name, package = %f.ast.package.node, "skipping file of another package");
            }
            keep
        });

        Ok(Self {
            path: path.to_string(),
            name,
            dir,
            files,
        })
    }

    /// The file named `name`, if present.
    pub fn file(&self, name: &str) -> Option<&LoadedFile> {
        self.files.iter().find(|f| f.name == name)
    }

    /// The package as a model reference.
    pub fn package_ref(&self) -> super::model::PackageRef {
        super::model::PackageRef {
            path: self.path.clone(),
            name: self.name.clone(),
        }
    }
}

/// Most common package clause among non-test packages, ties broken by first appearance.
fn choose_package_name(files: &[LoadedFile]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for file in files {
        let name = file.ast.package.node.as_str();
        match index.get(name) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(name, counts.len());
                counts.push((name, 1));
            }
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for &(name, count) in counts.iter().filter(|(n, _)| !n.ends_with(TEST_PACKAGE_SUFFIX)) {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((name, count));
        }
    }
    best.or_else(|| counts.first().copied()).map(|(name, _)| name.to_string())
}

/// Whether the file's build constraints (`//go:build` or legacy `// +build`) mention the `ignore` tag.
fn has_ignore_constraint(source: &str) -> bool {
    for line in source.lines() {
        let line = line.trim();
        if line.starts_with("package ") {
            return false;
        }
        let expr = line
            .strip_prefix("//go:build")
            .or_else(|| line.strip_prefix("// +build"));
        if let Some(expr) = expr {
            let mentions_ignore = expr
                .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
                .any(|tag| tag == "ignore");
            if mentions_ignore {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src(name: &str, text: &str) -> (String, String) {
        (name.to_string(), text.to_string())
    }

    #[test]
    fn test_files_are_sorted_and_imports_tabled() {
        let pkg = LoadedPackage::from_sources(
            "example.com/app",
            None,
            vec![
                src("b.go", "package app\nimport \"time\"\n"),
                src("a.go", "package app\n"),
            ],
            true,
        )
        .unwrap();
        assert_eq!(pkg.name, "app");
        let names: Vec<&str> = pkg.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.go", "b.go"]);
        assert_eq!(pkg.file("b.go").unwrap().imports.path_for("time"), Some("time"));
    }

    #[test]
    fn test_ignore_constraint_and_external_tests() {
        let pkg = LoadedPackage::from_sources(
            "example.com/app",
            None,
            vec![
                src("gen.go", "//go:build ignore\n\npackage main\n"),
                src("app.go", "package app\n"),
                src("app_test.go", "package app_test\n"),
            ],
            true,
        )
        .unwrap();
        assert_eq!(pkg.name, "app");
        assert_eq!(pkg.files.len(), 1);
    }

    #[test]
    fn test_only_test_package_is_used() {
        let pkg = LoadedPackage::from_sources(".", None, vec![src("x_test.go", "package app_test\n")], true).unwrap();
        assert_eq!(pkg.name, "app_test");
    }

    #[test]
    fn test_foreign_packages_skip_tests_and_bad_files() {
        let pkg = LoadedPackage::from_sources(
            "fmt",
            None,
            vec![
                src("print.go", "package fmt\ntype Stringer interface { String() string }\n"),
                src("broken.go", "package fmt\ntype = \n"),
                src("fmt_test.go", "package fmt\n"),
            ],
            false,
        )
        .unwrap();
        assert_eq!(pkg.files.len(), 1);
    }

    #[test]
    fn test_local_syntax_error_is_fatal() {
        let err = LoadedPackage::from_sources(".", None, vec![src("a.go", "package app\ntype = \n")], true).unwrap_err();
        assert!(matches!(err, GenerateError::Syntax { ref file, .. } if file == "a.go"));
    }

    #[test]
    fn test_empty_package_not_found() {
        let err = LoadedPackage::from_sources("example.com/none", None, Vec::new(), false).unwrap_err();
        assert!(matches!(err, GenerateError::PackageNotFound { .. }));
    }

    #[test]
    fn test_build_constraint_detection() {
        assert!(has_ignore_constraint("// +build ignore\n\npackage main\n"));
        assert!(has_ignore_constraint("//go:build ignore && linux\npackage main\n"));
        assert!(!has_ignore_constraint("//go:build linux\npackage main\n"));
        assert!(!has_ignore_constraint("package main\n//go:build ignore\n"));
    }
}
