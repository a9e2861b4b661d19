//! Filesystem exercise over a fixed per-user folder layout.
//!
//! A run creates a small workspace under the user-data root, writes a sample
//! file, then archives the save-data directory under a timestamped name. The
//! crate keeps a strict separation:
//!
//! - **[`core`]**: Pure logic (folder set, archive naming, config rewrite).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (filesystem, settings, image
//!   encoding, the interactive phase gate).
//!
//! [`session`] coordinates the two to implement the CLI commands.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
