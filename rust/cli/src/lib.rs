//! # Whale CLI Library
//!
//! Command-line front-end for the whale dice run engine.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments and executes a subcommand, reading interactive
//! input from stdin. [`run_with_input`] takes the input stream explicitly.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["whale", "score", "6S", "6H", "6D", "6C", "6S"];
//! let code = whale_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play a run in the terminal, optionally resuming a save
//! - `score`: Score five faces without starting a run
//! - `rng`: Print a sample of the run RNG stream
//! - `cfg`: Display the resolved configuration and value sources

use std::io::{BufRead, Write};

use clap::Parser;

#[macro_use]
mod macros;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, WhaleCli};
use commands::{
    handle_cfg_command, handle_play_command, handle_rng_command, handle_score_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["play", "score", "rng", "cfg"];

/// Main entry point for the CLI application.
///
/// # Arguments
///
/// * `args` - Command-line arguments, program name first
/// * `out` - Output stream for normal output
/// * `err` - Output stream for errors and warnings
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// ```
/// use std::io;
/// let args = vec!["whale", "rng", "--seed", "42"];
/// let code = whale_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, out, err, &mut stdin_lock)
}

/// Same as [`run`], with `play` reading its commands from `input`.
pub fn run_with_input<I, S>(
    args: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
    input: &mut dyn BufRead,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match WhaleCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout and succeed
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "Whale Dice CLI");
                    write_or_exit!(err, "Usage: whale <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: whale --help");
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Play { seed, resume } => handle_play_command(seed, resume, out, err, input),
        Commands::Score { faces, rule } => handle_score_command(&faces, rule, out),
        Commands::Rng { seed } => handle_rng_command(seed, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}
