//! Generator version information.
//!
//! The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time so the CLI and anything else that
//! reports a version agree on it.

/// The syncmock version string (for example, `0.1.0`).
pub const SYNCMOCK_VERSION: &str = env!("CARGO_PKG_VERSION");
