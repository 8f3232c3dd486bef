//! Error taxonomy for mock generation.
//!
//! Every stage of the pipeline (load, resolve, validate, render, write) fails with a [`GenerateError`]. Errors
//! carry the symbol name, package path and offending type where they apply, plus a stable diagnostic code and help
//! text for `miette` reports.

use miette::Diagnostic;
use syncmock_syntax::diagnostics::{self, CompileError};
use thiserror::Error;

/// Errors produced while generating a mock.
#[derive(Debug, Error, Diagnostic)]
pub enum GenerateError {
    /// An import path could not be located by the source loader.
    #[error("package not found: {path} ({context})")]
    #[diagnostic(
        code(syncmock::package_not_found),
        help("check the import path and that the package is available in the module, vendor/, the module cache or GOROOT")
    )]
    PackageNotFound { path: String, context: String },

    /// No interface or function with the requested name exists in the package.
    #[error("symbol {symbol} not found in {package}: {interface_check}; {function_check}")]
    #[diagnostic(
        code(syncmock::symbol_not_found),
        help("the target must name an interface type or a function/method declared in that package")
    )]
    SymbolNotFound {
        symbol: String,
        package: String,
        interface_check: String,
        function_check: String,
    },

    /// An interface embeds something other than a plain or package-qualified interface name.
    #[error("unsupported embedding `{embedded}` in interface {symbol} ({package})")]
    #[diagnostic(
        code(syncmock::unsupported_embedding),
        help("only `Name` and `pkg.Name` interface embeddings can be expanded")
    )]
    UnsupportedEmbedding {
        symbol: String,
        package: String,
        embedded: String,
    },

    /// A signature references a type that is not accessible from the output package.
    #[error("type {type_name} used by {symbol}.{method} ({package}) is not exported")]
    #[diagnostic(
        code(syncmock::unexported_type),
        help("generate the mock into the declaring package, or export the type")
    )]
    UnexportedType {
        type_name: String,
        method: String,
        symbol: String,
        package: String,
    },

    /// The symbol cannot be rendered as a mock (for example a method name collides with a mock member).
    #[error("cannot render mock for {symbol}: {message}")]
    #[diagnostic(code(syncmock::render))]
    Render { symbol: String, message: String },

    /// A loaded Go file failed to lex or parse.
    #[error("{}", render_syntax_errors(.file, .contents, .errors))]
    #[diagnostic(code(syncmock::syntax))]
    Syntax {
        file: String,
        contents: String,
        errors: Vec<CompileError>,
    },

    /// Reading sources or writing the artifact failed.
    #[error("I/O error on {path}: {error}")]
    #[diagnostic(code(syncmock::io))]
    Io {
        path: String,
        #[source]
        error: std::io::Error,
    },
}

impl GenerateError {
    /// Shorthand for an I/O failure on `path`.
    pub fn io(path: impl Into<String>, error: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            error,
        }
    }

    pub fn render(symbol: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            symbol: symbol.into(),
            message: message.into(),
        }
    }
}

fn render_syntax_errors(file: &str, contents: &str, errors: &[CompileError]) -> String {
    let mut msg = String::new();
    for err in errors {
        msg.push_str(&diagnostics::format_error(file, contents, err));
        msg.push('\n');
    }
    msg.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use syncmock_syntax::ast::Span;

    #[test]
    fn test_symbol_not_found_mentions_both_checks() {
        let err = GenerateError::SymbolNotFound {
            symbol: "Store".to_string(),
            package: "example.com/app".to_string(),
            interface_check: "no interface type named Store".to_string(),
            function_check: "no function or method named Store".to_string(),
        };
        insta::assert_snapshot!(err.to_string(), @"symbol Store not found in example.com/app: no interface type named Store; no function or method named Store");
    }

    #[test]
    fn test_syntax_error_renders_source_context() {
        let err = GenerateError::Syntax {
            file: "store.go".to_string(),
            contents: "package store\ntype\n".to_string(),
            errors: vec![CompileError::syntax(
                "Expected identifier, found ';' or newline".to_string(),
                Span::new(18, 18),
            )],
        };
        let text = err.to_string();
        assert!(text.starts_with("syntax error: Expected identifier"));
        assert!(text.contains("--> store.go:2:5"));
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = GenerateError::PackageNotFound {
            path: "example.com/missing".to_string(),
            context: "embedded interface missing.Iface".to_string(),
        };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("syncmock::package_not_found"));
        assert!(err.to_string().contains("embedded interface"));
    }
}
