//! CLI module for the syncmock generator
//!
//! This module provides the command-line interface. It is meant to be driven by `go generate`:
//!
//! ```text
//! //go:generate syncmock Store
//! //go:generate syncmock -n FakeClock clock.Clock
//! ```
//!
//! `go generate` exports `GOPACKAGE` and `GOFILE`, which fill `--package` and `--source-file`.
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::config::DEFAULT_DISPATCH_CAPACITY;
use crate::version::SYNCMOCK_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// Command-line usage errors
    pub const USAGE: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Create a usage error (exit code 2).
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::USAGE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate a synchronized mock for a Go interface or function
#[derive(Parser, Debug)]
#[command(name = "syncmock")]
#[command(version = SYNCMOCK_VERSION)]
#[command(about = "Generate synchronized mocks for Go interfaces and functions", long_about = None)]
pub struct Cli {
    /// Interface or function to mock: `Name` or `pkg.Name`
    #[arg(value_name = "SYMBOL", required_unless_present_any = ["lex_file", "parse_file"])]
    pub target: Option<String>,

    /// Name of the generated mock type (default: <Symbol>Imp)
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Package clause of the generated file (default: the package in --dir)
    #[arg(long = "package", value_name = "PACKAGE", env = "GOPACKAGE")]
    pub package: Option<String>,

    /// File containing the go:generate directive
    #[arg(long = "source-file", value_name = "FILE", env = "GOFILE")]
    pub source_file: Option<String>,

    /// Directory of the local package; the mock is written here
    #[arg(long = "dir", value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Capacity of the generated call channel
    #[arg(long = "dispatch-capacity", value_name = "N", default_value_t = DEFAULT_DISPATCH_CAPACITY)]
    pub dispatch_capacity: usize,

    /// Print the generated file instead of writing it
    #[arg(long = "stdout")]
    pub stdout: bool,

    /// Print the resolved symbol as JSON and exit (debug)
    #[arg(long = "dump-model", conflicts_with = "stdout")]
    pub dump_model: bool,

    // Debug/development flags
    /// Tokenize a Go file (debug)
    #[arg(long = "lex", value_name = "FILE", conflicts_with = "target")]
    pub lex_file: Option<PathBuf>,

    /// Parse a Go file and print its declarations (debug)
    #[arg(long = "parse", value_name = "FILE", conflicts_with = "target")]
    pub parse_file: Option<PathBuf>,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    // Handle debug flags first
    if let Some(file) = cli.lex_file {
        return commands::lex_file(&file.to_string_lossy());
    }
    if let Some(file) = cli.parse_file {
        return commands::parse_file(&file.to_string_lossy());
    }

    let Some(target) = cli.target else {
        return Err(CliError::usage("error: a target symbol is required"));
    };
    let options = commands::GenerateOptions {
        target,
        name: cli.name,
        package: cli.package,
        source_file: cli.source_file,
        dir: cli.dir,
        dispatch_capacity: cli.dispatch_capacity,
        stdout: cli.stdout,
    };
    if cli.dump_model {
        return commands::dump_model(&options);
    }
    commands::generate(&options)
}

// ============================================================================
// Tests
// ============================================================================
