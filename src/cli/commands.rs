//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::backend::{FsWriter, GeneratedArtifact};
use crate::config::{GenerateConfig, GoEnv, InvocationContext};
use crate::errors::GenerateError;
use crate::frontend::loader::FsLoader;
use crate::frontend::{diagnostics, lexer, parser};
use crate::pipeline::{self, GeneratorRequest};

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size for the debug commands (100 MB).
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Options of a generation run, as collected from flags and the environment.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub target: String,
    pub name: Option<String>,
    pub package: Option<String>,
    pub source_file: Option<String>,
    pub dir: PathBuf,
    pub dispatch_capacity: usize,
    pub stdout: bool,
}

impl GenerateOptions {
    fn context(&self) -> InvocationContext {
        InvocationContext::new(&self.dir)
            .with_output_package(self.package.clone())
            .with_source_file(self.source_file.clone())
    }

    fn request(&self) -> GeneratorRequest {
        GeneratorRequest::new(&self.target)
            .with_mock_name(self.name.clone())
            .with_context(&self.context())
    }

    fn config(&self) -> GenerateConfig {
        GenerateConfig::new().with_dispatch_capacity(self.dispatch_capacity)
    }

    fn loader(&self) -> FsLoader {
        FsLoader::new(&self.dir, GoEnv::from_env())
    }
}

/// Render a generation error as a `miette` report.
fn report(error: GenerateError) -> CliError {
    CliError::failure(format!("{:?}", miette::Report::new(error)))
}

/// Generate the mock and write it (or print it with `--stdout`).
pub fn generate(options: &GenerateOptions) -> CliResult<ExitCode> {
    let loader = options.loader();
    let artifact = pipeline::generate(&options.request(), &loader, &options.config()).map_err(report)?;

    if options.stdout {
        print_artifact(&artifact)?;
    } else {
        let mut writer = FsWriter::new(&options.dir);
        artifact.write_to(&mut writer).map_err(|e| {
            let path = writer.path_of(&artifact.file_name);
            report(GenerateError::io(path.display().to_string(), e))
        })?;
    }
    Ok(ExitCode::SUCCESS)
}

fn print_artifact(artifact: &GeneratedArtifact) -> CliResult<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(artifact.source.as_bytes())
        .map_err(|e| CliError::failure(format!("Error writing to stdout: {}", e)))
}

/// Print the resolved symbol as JSON.
pub fn dump_model(options: &GenerateOptions) -> CliResult<ExitCode> {
    let loader = options.loader();
    let resolved = pipeline::resolve(&options.request(), &loader).map_err(report)?;
    let json = serde_json::to_string_pretty(&resolved)
        .map_err(|e| CliError::failure(format!("Error serializing model: {}", e)))?;
    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(file_path: &str) -> CliResult<String> {
    // Check file size before reading
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

fn format_errors(file_path: &str, source: &str, errors: &[diagnostics::CompileError]) -> CliError {
    let mut msg = String::new();
    for err in errors {
        msg.push_str(&diagnostics::format_error(file_path, source, err));
    }
    CliError::failure(msg.trim_end())
}

/// Lex and display tokens.
pub fn lex_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lexer::lex(&source).map_err(|errs| format_errors(file_path, &source, &errs))?;

    for tok in &tokens {
        println!("{:?}", tok);
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse and display the declarations.
pub fn parse_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lexer::lex(&source).map_err(|errs| format_errors(file_path, &source, &errs))?;
    let ast = parser::parse(&tokens).map_err(|errs| format_errors(file_path, &source, &errs))?;
    println!("{:#?}", ast);
    Ok(ExitCode::SUCCESS)
}
