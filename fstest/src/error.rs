//! Typed errors the binary maps to distinct exit codes.
//!
//! Everything else travels as `anyhow::Error` with path context attached.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The config does not hold exactly one line per folder kind.
    #[error("malformed config: expected {expected} folder entries, found {found}")]
    Malformed { expected: usize, found: usize },
}
