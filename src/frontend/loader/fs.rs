//! Filesystem source loader.
//!
//! Packages are looked up the way the Go toolchain would find them for a module build, in this order:
//! 1. the current module (`go.mod` module path prefix)
//! 2. `replace` directives pointing at directories
//! 3. `vendor/` of the current module
//! 4. the module cache, using the version from `require` (or a versioned `replace`)
//! 5. `GOROOT/src`
//! 6. each `GOPATH/src`

use std::fs;
use std::path::{Path, PathBuf};

use syncmock_core::lang::conventions::LOCAL_IMPORT_PATH;

use super::gomod::{self, GoModule};
use super::{LoadedPackage, SourceLoader};
use crate::config::GoEnv;
use crate::errors::GenerateError;

/// Extension of Go source files, without the dot.
const GO_FILE_EXTENSION: &str = "go";

/// Loads packages from disk relative to an invocation directory.
#[derive(Debug, Clone)]
pub struct FsLoader {
    /// Directory of the local package
    dir: PathBuf,
    module: Option<GoModule>,
    env: GoEnv,
}

impl FsLoader {
    /// Create a loader for the package in `dir`, discovering the enclosing module.
    pub fn new(dir: impl Into<PathBuf>, env: GoEnv) -> Self {
        let dir = dir.into();
        let dir = fs::canonicalize(&dir).unwrap_or(dir);
        let module = GoModule::discover(&dir);
        if module.is_none() {
            tracing::debug!(dir = %dir.display(), "no go.mod found; local package has no import path");
        }
        Self { dir, module, env }
    }

    pub fn module(&self) -> Option<&GoModule> {
        self.module.as_ref()
    }

    /// Import path of the local package, or `"."` outside a module.
    pub fn local_import_path(&self) -> String {
        self.module
            .as_ref()
            .and_then(|m| m.import_path_of(&self.dir))
            .unwrap_or_else(|| LOCAL_IMPORT_PATH.to_string())
    }

    /// Candidate directories for `import_path`, most specific first.
    fn candidates(&self, import_path: &str) -> Vec<PathBuf> {
        let mut dirs = Vec::new();

        if let Some(module) = &self.module {
            if let Some(dir) = module.relative_dir(import_path) {
                dirs.push(dir);
            }

            let replacement = module.replacement_for(import_path);
            if let Some(rep) = replacement {
                let rest = gomod::split_module_prefix(&rep.old_path, import_path).unwrap_or_default();
                match &rep.new_version {
                    None => dirs.push(module.dir.join(&rep.new_path).join(rest)),
                    Some(version) => {
                        if let Some(cache) = &self.env.gomodcache {
                            dirs.push(module_cache_dir(cache, &rep.new_path, version).join(rest));
                        }
                    }
                }
            }

            dirs.push(module.dir.join("vendor").join(import_path));

            if replacement.is_none() {
                if let (Some(req), Some(cache)) = (module.requirement_for(import_path), &self.env.gomodcache) {
                    let rest = gomod::split_module_prefix(&req.path, import_path).unwrap_or_default();
                    dirs.push(module_cache_dir(cache, &req.path, &req.version).join(rest));
                }
            }
        }

        if let Some(goroot) = &self.env.goroot {
            dirs.push(goroot.join("src").join(import_path));
        }
        for gopath in &self.env.gopath {
            dirs.push(gopath.join("src").join(import_path));
        }
        dirs
    }

    fn read_package(&self, import_path: &str, dir: &Path, local: bool) -> Result<LoadedPackage, GenerateError> {
        let sources = read_go_files(dir)?;
        LoadedPackage::from_sources(import_path, Some(dir.to_path_buf()), sources, local)
    }
}

impl SourceLoader for FsLoader {
    #[tracing::instrument(skip(self))]
    fn load(&self, import_path: &str) -> Result<LoadedPackage, GenerateError> {
        let local_path = self.local_import_path();
        if import_path == LOCAL_IMPORT_PATH || import_path == local_path {
            return self.read_package(&local_path, &self.dir, true);
        }

        for dir in self.candidates(import_path) {
            if !has_go_files(&dir) {
                tracing::debug!(dir = %dir.display(), "no package here");
                continue;
            }
            tracing::debug!(dir = %dir.display(), "package found");
            return self.read_package(import_path, &dir, false);
        }

        Err(GenerateError::PackageNotFound {
            path: import_path.to_string(),
            context: "not found in module, vendor, module cache, GOROOT or GOPATH".to_string(),
        })
    }
}

/// `<cache>/<escaped module>@<escaped version>`.
fn module_cache_dir(cache: &Path, module: &str, version: &str) -> PathBuf {
    cache.join(format!("{}@{}", gomod::escape_path(module), gomod::escape_path(version)))
}

fn is_go_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == GO_FILE_EXTENSION)
}

fn has_go_files(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|entries| entries.flatten().any(|e| is_go_file(&e.path())))
        .unwrap_or(false)
}

/// Read every `.go` file directly inside `dir` as `(file name, source)`.
fn read_go_files(dir: &Path) -> Result<Vec<(String, String)>, GenerateError> {
    let entries = fs::read_dir(dir).map_err(|e| GenerateError::io(dir.display().to_string(), e))?;
    let mut sources = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| GenerateError::io(dir.display().to_string(), e))?.path();
        if !is_go_file(&path) {
            continue;
        }
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        let source = fs::read_to_string(&path).map_err(|e| GenerateError::io(path.display().to_string(), e))?;
        sources.push((name, source));
    }
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fresh scratch directory under the system temp dir.
    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("syncmock-fs-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write(path: &Path, text: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[test]
    fn test_local_and_module_internal_packages() {
        let root = scratch("module");
        write(&root.join("go.mod"), "module example.com/app\n\ngo 1.22\n");
        write(&root.join("svc/svc.go"), "package svc\ntype Svc interface { Run() }\n");
        write(&root.join("store/store.go"), "package store\ntype Row struct{}\n");

        let loader = FsLoader::new(root.join("svc"), GoEnv::default());
        assert_eq!(loader.local_import_path(), "example.com/app/svc");

        let local = loader.load(".").unwrap();
        assert_eq!(local.name, "svc");
        assert_eq!(local.path, "example.com/app/svc");

        let store = loader.load("example.com/app/store").unwrap();
        assert_eq!(store.name, "store");

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_goroot_and_module_cache() {
        let root = scratch("cache");
        let goroot = root.join("goroot");
        let cache = root.join("modcache");
        write(&goroot.join("src/fmt/print.go"), "package fmt\ntype Stringer interface { String() string }\n");
        write(
            &cache.join("github.com/!burnt!sushi/toml@v1.3.2/decode.go"),
            "package toml\ntype Unmarshaler interface { UnmarshalTOML(any) error }\n",
        );
        let app = root.join("app");
        write(
            &app.join("go.mod"),
            "module example.com/app\nrequire github.com/BurntSushi/toml v1.3.2\n",
        );
        write(&app.join("app.go"), "package app\n");

        let env = GoEnv {
            goroot: Some(goroot),
            gopath: Vec::new(),
            gomodcache: Some(cache),
        };
        let loader = FsLoader::new(&app, env);
        assert_eq!(loader.load("fmt").unwrap().name, "fmt");
        assert_eq!(loader.load("github.com/BurntSushi/toml").unwrap().name, "toml");

        let err = loader.load("example.com/missing").unwrap_err();
        assert!(matches!(err, GenerateError::PackageNotFound { .. }));

        let _ = fs::remove_dir_all(&root);
    }
}
