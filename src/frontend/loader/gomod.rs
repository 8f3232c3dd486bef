//! Minimal `go.mod` reader.
//!
//! Only the directives that influence where a package lives on disk are understood: `module`, `require` and
//! `replace` (single-line and block forms). Everything else is ignored.

use std::path::{Path, PathBuf};

/// File name of a module definition.
pub const GO_MOD: &str = "go.mod";

/// A `require` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub path: String,
    pub version: String,
}

/// A `replace` entry. `new_version` is `None` for filesystem replacements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub old_path: String,
    pub new_path: String,
    pub new_version: Option<String>,
}

impl Replacement {
    /// Whether the replacement points at a directory rather than another module version.
    pub fn is_local(&self) -> bool {
        self.new_version.is_none()
    }
}

/// The module enclosing the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoModule {
    /// Module path from the `module` directive
    pub path: String,
    /// Directory containing `go.mod`
    pub dir: PathBuf,
    pub requires: Vec<Requirement>,
    pub replaces: Vec<Replacement>,
}

impl GoModule {
    /// Find the nearest `go.mod` at or above `start` and parse it.
    pub fn discover(start: &Path) -> Option<Self> {
        for dir in start.ancestors() {
            let candidate = dir.join(GO_MOD);
            if !candidate.is_file() {
                continue;
            }
            let contents = match std::fs::read_to_string(&candidate) {
                Ok(contents) => contents,
                Err(e) => {
                    tracing::warn!(path = %candidate.display(), error = %e, "failed to read go.mod");
                    return None;
                }
            };
            tracing::debug!(path = %candidate.display(), "found go.mod");
            return parse(&contents, dir);
        }
        None
    }

    /// The import path of `dir` inside this module, if `dir` lies within it.
    pub fn import_path_of(&self, dir: &Path) -> Option<String> {
        let rel = dir.strip_prefix(&self.dir).ok()?;
        let mut path = self.path.clone();
        for component in rel.components() {
            path.push('/');
            path.push_str(&component.as_os_str().to_string_lossy());
        }
        Some(path)
    }

    /// Path of `import_path` relative to the module root, when the package belongs to this module.
    pub fn relative_dir(&self, import_path: &str) -> Option<PathBuf> {
        split_module_prefix(&self.path, import_path).map(|rest| self.dir.join(rest))
    }

    /// The requirement providing `import_path` (longest module-path prefix wins).
    pub fn requirement_for(&self, import_path: &str) -> Option<&Requirement> {
        self.requires
            .iter()
            .filter(|r| split_module_prefix(&r.path, import_path).is_some())
            .max_by_key(|r| r.path.len())
    }

    /// The replacement for the module providing `import_path` (longest prefix wins).
    pub fn replacement_for(&self, import_path: &str) -> Option<&Replacement> {
        self.replaces
            .iter()
            .filter(|r| split_module_prefix(&r.old_path, import_path).is_some())
            .max_by_key(|r| r.old_path.len())
    }
}

/// Remainder of `import_path` below `module`, or `None` when `import_path` is outside `module`.
pub fn split_module_prefix<'a>(module: &str, import_path: &'a str) -> Option<&'a str> {
    if import_path == module {
        return Some("");
    }
    import_path.strip_prefix(module)?.strip_prefix('/')
}

/// Parse `go.mod` contents. Returns `None` when no `module` directive is present.
pub fn parse(contents: &str, dir: &Path) -> Option<GoModule> {
    let mut path = None;
    let mut requires = Vec::new();
    let mut replaces = Vec::new();
    let mut block: Option<&str> = None;

    for raw in contents.lines() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        if let Some(directive) = block {
            if line == ")" {
                block = None;
            } else {
                apply(directive, line, &mut path, &mut requires, &mut replaces);
            }
            continue;
        }
        let (directive, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        if rest == "(" {
            block = Some(directive);
        } else {
            apply(directive, rest, &mut path, &mut requires, &mut replaces);
        }
    }

    Some(GoModule {
        path: path?,
        dir: dir.to_path_buf(),
        requires,
        replaces,
    })
}

fn apply(
    directive: &str,
    args: &str,
    path: &mut Option<String>,
    requires: &mut Vec<Requirement>,
    replaces: &mut Vec<Replacement>,
) {
    let words: Vec<String> = args.split_whitespace().map(unquote).collect();
    match directive {
        "module" => {
            if let Some(module) = words.first() {
                *path = Some(module.clone());
            }
        }
        "require" => {
            if let [module, version, ..] = words.as_slice() {
                requires.push(Requirement {
                    path: module.clone(),
                    version: version.clone(),
                });
            }
        }
        "replace" => {
            let Some(arrow) = words.iter().position(|w| w == "=>") else {
                return;
            };
            let (old, new) = words.split_at(arrow);
            let new = &new[1..];
            if let (Some(old_path), Some(new_path)) = (old.first(), new.first()) {
                replaces.push(Replacement {
                    old_path: old_path.clone(),
                    new_path: new_path.clone(),
                    new_version: new.get(1).cloned(),
                });
            }
        }
        _ => {}
    }
}

fn strip_comment(line: &str) -> &str {
    line.split_once("//").map_or(line, |(before, _)| before)
}

fn unquote(word: &str) -> String {
    word.trim_matches(|c| c == '"' || c == '`').to_string()
}

/// Case-encode a module path or version for the module cache: upper-case letters become `!` plus the lower-case
/// letter (`github.com/BurntSushi/toml` → `github.com/!burnt!sushi/toml`).
pub fn escape_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if c.is_ascii_uppercase() {
            out.push('!');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const GO_MOD_TEXT: &str = r#"
module example.com/app // the application

go 1.22

require github.com/BurntSushi/toml v1.3.2

require (
    golang.org/x/sync v0.6.0
    example.com/lib v1.0.0 // indirect
)

replace example.com/lib => ../lib
replace (
    golang.org/x/sync v0.6.0 => golang.org/x/sync v0.7.0
)
"#;

    #[test]
    fn test_parse_directives() {
        let module = parse(GO_MOD_TEXT, Path::new("/src/app")).unwrap();
        assert_eq!(module.path, "example.com/app");
        assert_eq!(module.requires.len(), 3);
        assert_eq!(module.requires[1].path, "golang.org/x/sync");
        assert_eq!(module.requires[1].version, "v0.6.0");

        let local = module.replacement_for("example.com/lib/store").unwrap();
        assert!(local.is_local());
        assert_eq!(local.new_path, "../lib");

        let versioned = module.replacement_for("golang.org/x/sync/errgroup").unwrap();
        assert_eq!(versioned.new_version.as_deref(), Some("v0.7.0"));
    }

    #[test]
    fn test_missing_module_directive() {
        assert_eq!(parse("go 1.22\n", Path::new("/")), None);
    }

    #[test]
    fn test_module_relative_paths() {
        let module = parse(GO_MOD_TEXT, Path::new("/src/app")).unwrap();
        assert_eq!(
            module.relative_dir("example.com/app/internal/store"),
            Some(PathBuf::from("/src/app/internal/store"))
        );
        assert_eq!(module.relative_dir("example.com/application"), None);
        assert_eq!(
            module.import_path_of(Path::new("/src/app/internal/store")).as_deref(),
            Some("example.com/app/internal/store")
        );
        assert_eq!(
            module.requirement_for("github.com/BurntSushi/toml/internal").map(|r| r.version.as_str()),
            Some("v1.3.2")
        );
    }

    #[test]
    fn test_escape_path() {
        assert_eq!(escape_path("github.com/BurntSushi/toml"), "github.com/!burnt!sushi/toml");
        assert_eq!(escape_path("golang.org/x/sync"), "golang.org/x/sync");
    }
}
