//! Generator backend
//!
//! This module turns a resolved symbol into Go source.
//!
//! The pipeline is:
//! 1. `validate` - reject types the output package cannot name
//! 2. `qualify` - plan imports and aliases once, then print types from the plan
//! 3. `render` - template data and Go text of the mock
//! 4. `artifact` - the file name and the write boundary
//!
//! ## Module Organization
//!
//! - `render/` - Mock rendering
//!   - `data.rs` - Template data (names, type strings, collisions)
//!   - `templates.rs` - Emitted declarations
//! - `writer.rs` - Low-level Go source builder (tabs, aligned fields)

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod artifact;
pub mod qualify;
pub mod render;
pub mod validate;
pub mod writer;

pub use artifact::{ArtifactWriter, FsWriter, GeneratedArtifact, MemoryWriter};
pub use qualify::QualificationPlan;
