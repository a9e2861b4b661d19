//! I/O helpers for fstest commands.

pub mod config;
pub mod fs;
pub mod gate;
pub mod jpeg;
pub mod paths;
pub mod settings;
