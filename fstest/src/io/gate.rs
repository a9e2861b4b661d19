//! Phase gate between setup and archival.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Decides when a prepared run may continue to archival.
pub trait PhaseGate {
    fn wait(&self) -> Result<()>;
}

/// Continues immediately.
pub struct OpenGate;

impl PhaseGate for OpenGate {
    fn wait(&self) -> Result<()> {
        Ok(())
    }
}

/// Blocks until a line (or EOF) arrives on stdin.
pub struct StdinGate;

impl PhaseGate for StdinGate {
    fn wait(&self) -> Result<()> {
        let mut stdout = io::stdout();
        write!(stdout, "Press Enter to archive...").context("write prompt")?;
        stdout.flush().context("flush prompt")?;
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("read from stdin")?;
        Ok(())
    }
}
