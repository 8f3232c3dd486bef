//! Layering guardrails to keep the syntax crate free of generator concerns.
//!
//! `syncmock_syntax` sits below the generator: it may depend on `syncmock_core` for vocabulary, never on the
//! `syncmock` crate itself or on the CLI and reporting stack. This test scans its `Cargo.toml` and fails if a
//! forbidden crate appears in `[dependencies]`.

const FORBIDDEN: &[&str] = &["syncmock ", "syncmock=", "clap", "serde_json", "miette"];

#[test]
fn syntax_crate_does_not_depend_on_generator() {
    let manifest = include_str!("../crates/syncmock_syntax/Cargo.toml");
    let mut in_dependencies = false;

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            if line == "[dependencies]" {
                in_dependencies = true;
                continue;
            }
            // Any new section after `[dependencies]` ends the scan window.
            if in_dependencies {
                break;
            }
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        for forbidden in FORBIDDEN {
            if line_no_comment.starts_with(forbidden) {
                panic!("`{line_no_comment}` must not appear in syncmock_syntax [dependencies]");
            }
        }
    }
}
