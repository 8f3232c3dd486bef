//! Go source writer with indentation tracking
//!
//! Indents with tabs and aligns two-column runs (struct fields) the way gofmt does, so generated files are already
//! in canonical format.

/// Writer that tracks indentation and builds Go source
#[derive(Debug, Default)]
pub struct GoWriter {
    /// The output buffer
    output: String,
    /// Current indentation level (tabs)
    indent_level: usize,
    /// Whether we're at the start of a line
    at_line_start: bool,
}

impl GoWriter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            at_line_start: true,
        }
    }

    /// Get the generated output
    pub fn finish(self) -> String {
        self.output
    }

    /// Increase indentation level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation level
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    fn write_indent(&mut self) {
        if self.at_line_start {
            for _ in 0..self.indent_level {
                self.output.push('\t');
            }
            self.at_line_start = false;
        }
    }

    /// Write a string (with auto-indent)
    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.write_indent();
        self.output.push_str(s);
    }

    /// Write a string and newline
    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    /// Write just a newline (never indented, so blank lines stay empty)
    pub fn newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    /// Write `header {`, the body one level deeper, then `}`.
    pub fn block(&mut self, header: &str, body: impl FnOnce(&mut Self)) {
        self.block_closed_by(header, "}", body);
    }

    /// Like [`GoWriter::block`], but closes with `closer` (`})` for a function literal argument).
    pub fn block_closed_by(&mut self, header: &str, closer: &str, body: impl FnOnce(&mut Self)) {
        self.writeln(&format!("{header} {{"));
        self.indent();
        body(self);
        self.dedent();
        self.writeln(closer);
    }

    /// Write one line per row with the first column padded to a common width.
    pub fn aligned(&mut self, rows: &[(String, String)]) {
        let width = rows.iter().map(|(left, _)| left.chars().count()).max().unwrap_or(0);
        for (left, right) in rows {
            let pad = width - left.chars().count();
            self.writeln(&format!("{left}{} {right}", " ".repeat(pad)));
        }
    }

    /// Write `//` comment lines.
    pub fn comment(&mut self, text: &str) {
        for line in text.lines() {
            if line.is_empty() {
                self.writeln("//");
            } else {
                self.writeln(&format!("// {line}"));
            }
        }
    }

    /// Get current indentation level
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }
}
