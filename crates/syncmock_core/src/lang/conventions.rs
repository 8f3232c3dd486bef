//! Shared naming conventions (well-known identifiers and identifier rules).

/// The blank identifier.
pub const BLANK_IDENT: &str = "_";

/// Default suffix appended to a symbol name to form the generated mock name (`Store` → `StoreImp`).
pub const DEFAULT_MOCK_SUFFIX: &str = "Imp";

/// Package-name suffix marking an external test package (`foo_test`).
pub const TEST_PACKAGE_SUFFIX: &str = "_test";

/// Import path denoting the package in the current directory.
pub const LOCAL_IMPORT_PATH: &str = ".";

/// Tool name written into the generated-code header.
pub const GENERATOR_NAME: &str = "syncmock";

/// Whether `name` is exported, i.e. starts with an upper-case letter.
///
/// ## Examples
/// ```rust
/// use syncmock_core::lang::conventions::is_exported;
///
/// assert!(is_exported("Reader"));
/// assert!(!is_exported("reader"));
/// assert!(!is_exported("_Reader"));
/// ```
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Upper-case the first letter of `name`, leaving the rest untouched.
///
/// Names that do not start with a lower-case letter are returned unchanged.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        _ => name.to_string(),
    }
}

/// Convert a Go identifier to `snake_case` for file naming (`HTTPClientImp` → `http_client_imp`).
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                None | Some('_') => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                Some(_) => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Derive the default import alias for an import path.
///
/// The alias is the last path segment, except that a trailing major-version segment (`/v2`) is skipped and a
/// `gopkg.in`-style `.vN` suffix is stripped.
///
/// ## Examples
/// ```rust
/// use syncmock_core::lang::conventions::default_import_alias;
///
/// assert_eq!(default_import_alias("net/http"), "http");
/// assert_eq!(default_import_alias("github.com/org/lib/v2"), "lib");
/// assert_eq!(default_import_alias("gopkg.in/yaml.v3"), "yaml");
/// ```
pub fn default_import_alias(path: &str) -> String {
    let mut segments = path.trim_end_matches('/').rsplit('/');
    let last = segments.next().unwrap_or(path);
    let segment = if is_major_version(last) {
        segments.next().unwrap_or(last)
    } else {
        last
    };
    match segment.rsplit_once(".v") {
        Some((base, version)) if !base.is_empty() && is_digits(version) => base.to_string(),
        _ => segment.to_string(),
    }
}

/// Whether an import path belongs to the standard library (no dot in its first element).
pub fn is_std_import_path(path: &str) -> bool {
    path != LOCAL_IMPORT_PATH && !path.split('/').next().unwrap_or("").contains('.')
}

fn is_major_version(segment: &str) -> bool {
    segment.len() > 1 && segment.starts_with('v') && is_digits(&segment[1..])
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
