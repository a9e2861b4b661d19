//! Stable exit codes for fstest CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed on an I/O error, invalid settings or any other error.
pub const FAILURE: i32 = 1;
/// `Config.txt` does not hold one entry per folder kind.
pub const MALFORMED_CONFIG: i32 = 3;
