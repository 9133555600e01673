//! Shared harness for CLI integration tests.
//!
//! `run_cli` drives [`whale_cli::run_with_input`] with in-memory streams.
//! `EnvGuard` sets configuration variables for one test and restores them on
//! drop; tests that touch the environment are `#[serial]`.

#![allow(dead_code)]

use std::io::Cursor;

use whale_cli::config::{CONFIG_ENV, SAVE_ENV, SEED_ENV};

#[derive(Debug, Clone)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str], input: &str) -> CliResult {
    let mut argv = vec!["whale"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut stdin = Cursor::new(input.as_bytes().to_vec());
    let exit_code = whale_cli::run_with_input(argv, &mut out, &mut err, &mut stdin);
    CliResult {
        exit_code,
        stdout: String::from_utf8(out).expect("stdout utf8"),
        stderr: String::from_utf8(err).expect("stderr utf8"),
    }
}

pub struct EnvGuard {
    restores: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    /// Clears every `WHALE_*` variable, then applies `pairs`.
    pub fn apply(pairs: &[(&str, &str)]) -> Self {
        let mut restores = Vec::new();
        for key in [CONFIG_ENV, SEED_ENV, SAVE_ENV] {
            restores.push((key.to_string(), std::env::var(key).ok()));
            unsafe { std::env::remove_var(key) };
        }
        for (key, value) in pairs {
            unsafe { std::env::set_var(key, value) };
        }
        EnvGuard { restores }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restores.iter().rev() {
            match previous {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

/// Writes `body` to `whale.toml` in `dir` and returns its path.
pub fn write_config(dir: &std::path::Path, body: &str) -> String {
    let path = dir.join("whale.toml");
    std::fs::write(&path, body).expect("write config");
    path.to_string_lossy().into_owned()
}
