//! Generation configuration and invocation context.
//!
//! - [`GenerateConfig`]: knobs that shape the generated code (dispatch capacity, name suffix, header tool name).
//! - [`InvocationContext`]: where the generator was invoked from (output package, triggering file, directory).
//! - [`GoEnv`]: the Go toolchain locations consulted by the filesystem loader, captured once.

use std::path::PathBuf;

use syncmock_core::lang::conventions::{DEFAULT_MOCK_SUFFIX, GENERATOR_NAME};

/// Default capacity of the generated dispatch channel.
pub const DEFAULT_DISPATCH_CAPACITY: usize = 100;

/// Code generation configuration
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Buffer size of the channel carrying calls from the mock to the controller
    pub dispatch_capacity: usize,
    /// Suffix appended to the symbol name when no explicit mock name is given
    pub name_suffix: String,
    /// Tool name written into the `// Code generated by ... DO NOT EDIT.` header
    pub tool_name: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            dispatch_capacity: DEFAULT_DISPATCH_CAPACITY,
            name_suffix: DEFAULT_MOCK_SUFFIX.to_string(),
            tool_name: GENERATOR_NAME.to_string(),
        }
    }
}

impl GenerateConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dispatch channel capacity
    pub fn with_dispatch_capacity(mut self, capacity: usize) -> Self {
        self.dispatch_capacity = capacity;
        self
    }

    /// Set the default mock-name suffix
    pub fn with_name_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.name_suffix = suffix.into();
        self
    }

    /// Set the tool name used in the generated-code header
    pub fn with_tool_name(mut self, name: impl Into<String>) -> Self {
        self.tool_name = name.into();
        self
    }

    /// Mock name for `symbol` when none was requested: the symbol's local name plus the suffix.
    ///
    /// A qualified target (`store.Store`, `example.com/x/store.Store`) contributes only its last component.
    pub fn default_mock_name(&self, symbol: &str) -> String {
        let local = symbol.rsplit_once('.').map_or(symbol, |(_, name)| name);
        format!("{local}{}", self.name_suffix)
    }

    /// The first line of every generated file.
    pub fn header(&self) -> String {
        format!("// Code generated by {}. DO NOT EDIT.", self.tool_name)
    }
}

/// Where and for which package the generator runs.
///
/// Under `go generate`, `GOPACKAGE` and `GOFILE` describe the triggering file; the CLI maps them onto this struct.
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
    /// Package clause of the generated file; `None` means "the package in `dir`"
    pub output_package: Option<String>,
    /// File containing the `//go:generate` directive, relative to `dir`
    pub source_file: Option<String>,
    /// Directory holding the local package and receiving the output
    pub dir: PathBuf,
}

impl InvocationContext {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn with_output_package(mut self, package: Option<String>) -> Self {
        self.output_package = package.filter(|p| !p.is_empty());
        self
    }

    pub fn with_source_file(mut self, file: Option<String>) -> Self {
        self.source_file = file.filter(|f| !f.is_empty());
        self
    }
}

/// Go toolchain locations used to find imported packages on disk.
#[derive(Debug, Clone, Default)]
pub struct GoEnv {
    pub goroot: Option<PathBuf>,
    /// Entries of `GOPATH` in order
    pub gopath: Vec<PathBuf>,
    pub gomodcache: Option<PathBuf>,
}

impl GoEnv {
    /// Capture `GOROOT`, `GOPATH` and `GOMODCACHE` from the process environment, with Go's defaults for the latter
    /// two (`$HOME/go` and `$GOPATH/pkg/mod`).
    ///
    /// When `GOROOT` is unset, `go env GOROOT` is consulted if a `go` binary is on `PATH`.
    pub fn from_env() -> Self {
        let goroot = non_empty_var("GOROOT")
            .map(PathBuf::from)
            .or_else(|| go_env_value("GOROOT").map(PathBuf::from));

        let gopath: Vec<PathBuf> = match non_empty_var("GOPATH") {
            Some(value) => std::env::split_paths(&value).collect(),
            None => non_empty_var("HOME")
                .map(|home| vec![PathBuf::from(home).join("go")])
                .unwrap_or_default(),
        };

        let gomodcache = non_empty_var("GOMODCACHE")
            .map(PathBuf::from)
            .or_else(|| gopath.first().map(|p| p.join("pkg").join("mod")));

        tracing::debug!(?goroot, ?gopath, ?gomodcache, "captured Go environment");
        Self {
            goroot,
            gopath,
            gomodcache,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn go_env_value(name: &str) -> Option<String> {
    let output = std::process::Command::new("go").args(["env", name]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8(output.stdout).ok()?.trim().to_string();
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GenerateConfig::default();
        assert_eq!(config.dispatch_capacity, 100);
        assert_eq!(config.name_suffix, "Imp");
        assert_eq!(config.header(), "// Code generated by syncmock. DO NOT EDIT.");
    }

    #[test]
    fn test_builder_chain() {
        let config = GenerateConfig::new()
            .with_dispatch_capacity(8)
            .with_name_suffix("Mock")
            .with_tool_name("gen");
        assert_eq!(config.dispatch_capacity, 8);
        assert_eq!(config.default_mock_name("Store"), "StoreMock");
        assert_eq!(config.header(), "// Code generated by gen. DO NOT EDIT.");
    }

    #[test]
    fn test_default_mock_name_uses_local_part() {
        let config = GenerateConfig::default();
        assert_eq!(config.default_mock_name("Ops"), "OpsImp");
        assert_eq!(config.default_mock_name("store.Store"), "StoreImp");
        assert_eq!(config.default_mock_name("example.com/x/store.Store"), "StoreImp");
    }

    #[test]
    fn test_invocation_context_ignores_empty_values() {
        let ctx = InvocationContext::new(".")
            .with_output_package(Some(String::new()))
            .with_source_file(Some("store.go".to_string()));
        assert_eq!(ctx.output_package, None);
        assert_eq!(ctx.source_file.as_deref(), Some("store.go"));
    }
}
