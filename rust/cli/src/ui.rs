//! UI helper functions for terminal output.
//!
//! Every command writes errors and warnings through these so the prefixes
//! stay consistent.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Write a player-facing engine message (rejections, purchases).
pub fn write_message(out: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(out, "> {}", message)
}
