//! Deterministic logic shared by the fstest session.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! values and return deterministic outputs suitable for tests.

pub mod archive_name;
pub mod folders;
pub mod rewrite;
