//! Diagnostics and error reporting for Go sources
//!
//! Syntax errors carry a byte span; [`format_error`] turns them into a `file:line:col` report with the offending
//! source line and a caret underline.

use crate::ast::Span;
use thiserror::Error;

/// A syntax error with location information
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct CompileError {
    pub message: String,
    pub span: Span,
    pub kind: ErrorKind,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl CompileError {
    pub fn new(message: String, span: Span) -> Self {
        Self {
            message,
            span,
            kind: ErrorKind::Error,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn syntax(message: String, span: Span) -> Self {
        Self {
            message,
            span,
            kind: ErrorKind::Syntax,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Error,
    Syntax,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Error => write!(f, "error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
        }
    }
}

/// Render an error with source context (no colors, suitable for logs and error chains)
pub fn format_error(file_name: &str, source: &str, error: &CompileError) -> String {
    let (line_num, col_num, line_text) = get_line_info(source, error.span.start);
    let gutter = " ".repeat(line_num.to_string().len());

    let underline_len = if error.span.end > error.span.start {
        (error.span.end - error.span.start)
            .min(line_text.len().saturating_sub(col_num - 1))
            .max(1)
    } else {
        1
    };

    let mut out = format!("{}: {}\n", error.kind, error.message);
    out.push_str(&format!("  --> {file_name}:{line_num}:{col_num}\n"));
    out.push_str(&format!("  {gutter} |\n"));
    out.push_str(&format!("  {line_num} | {line_text}\n"));
    out.push_str(&format!(
        "  {gutter} | {}{}\n",
        " ".repeat(col_num - 1),
        "^".repeat(underline_len)
    ));
    for note in &error.notes {
        out.push_str(&format!("  = note: {note}\n"));
    }
    for hint in &error.hints {
        out.push_str(&format!("  = hint: {hint}\n"));
    }
    out
}

/// Get line number, column number, and line text for a byte offset
fn get_line_info(source: &str, offset: usize) -> (usize, usize, &str) {
    let offset = offset.min(source.len());
    let mut line_num = 1;
    let mut line_start = 0;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line_num += 1;
            line_start = i + 1;
        }
    }

    let line_end = source[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(source.len());

    let line_text = source[line_start..line_end].trim_end_matches('\r');
    let col_num = offset - line_start + 1;

    (line_num, col_num, line_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_info_second_line() {
        let source = "package a\n\ntype X int\n";
        let (line, col, text) = get_line_info(source, 16);
        assert_eq!(line, 3);
        assert_eq!(col, 6);
        assert_eq!(text, "type X int");
    }

    #[test]
    fn test_format_error_points_at_span() {
        let source = "package a\ntype = int\n";
        let err = CompileError::syntax("Expected type name".to_string(), Span::new(15, 16))
            .with_hint("type declarations need a name");
        insta::assert_snapshot!(format_error("a.go", source, &err), @r"
        syntax error: Expected type name
          --> a.go:2:6
            |
          2 | type = int
            |      ^
          = hint: type declarations need a name
        ");
    }

    #[test]
    fn test_display_includes_kind() {
        let err = CompileError::new("boom".to_string(), Span::default());
        assert_eq!(err.to_string(), "error: boom");
    }
}
