#![forbid(unsafe_code)]
//! syncmock: synchronized mock generator for Go
//!
//! Given a Go interface or function, syncmock emits a Go source file with a mock whose calls are delivered to the
//! test as values. The test matches calls, inspects their arguments and injects results or panics, so the code
//! under test and the controlling test run as independent goroutines in lockstep.
//!
//! This crate provides the generator: frontend (source loading, symbol resolution, signature normalization),
//! backend (export validation, import planning, rendering) and the CLI.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Generated code**: The templates emit `panic(...)` as *string literals* in generated Go code. This is
//!   acceptable (these are output strings, not actual panics in the generator).
//!
//! ## Examples
//! ```rust
//! use syncmock::config::GenerateConfig;
//! use syncmock::frontend::loader::MemoryLoader;
//! use syncmock::pipeline::{generate, GeneratorRequest};
//!
//! let loader = MemoryLoader::new("example.com/clock").with_file(
//!     "example.com/clock",
//!     "clock.go",
//!     "package clock\n\ntype Clock interface { Now() int64 }\n",
//! );
//! let artifact = generate(&GeneratorRequest::new("Clock"), &loader, &GenerateConfig::default()).unwrap();
//! assert_eq!(artifact.file_name, "clock_imp.go");
//! assert!(artifact.source.contains("func (_c *ClockImp_Now_Call) InjectResult(r0 int64) {"));
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod errors;
pub mod frontend;
pub mod pipeline;
pub mod version;

pub use frontend::ast;
pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::parser;

pub use backend::{ArtifactWriter, FsWriter, GeneratedArtifact, MemoryWriter};
pub use config::{GenerateConfig, InvocationContext};
pub use errors::GenerateError;
pub use pipeline::{GeneratorRequest, generate};
