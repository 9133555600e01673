//! `cfg`: show the resolved configuration with the layer each value came
//! from (`default`, `file` or `env`).
//!
//! ```json
//! {
//!   "seed": {
//!     "value": null,
//!     "source": "default"
//!   },
//!   "save_path": {
//!     "value": "data/whale_save.json",
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use std::io::Write;

use crate::config;
use crate::error::CliError;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if the configuration cannot be loaded and
/// `CliError::Io` if writing fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()
        .map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))?;

    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "save_path": {
            "value": config.save_path,
            "source": sources.save_path,
        },
        "history_path": {
            "value": config.history_path,
            "source": sources.history_path,
        },
        "run": {
            "value": config.run,
            "source": sources.run,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            std::env::remove_var(config::CONFIG_ENV);
            std::env::remove_var(config::SEED_ENV);
            std::env::remove_var(config::SAVE_ENV);
        }
    }

    #[test]
    #[serial]
    fn defaults_as_pretty_json() {
        clear_env();
        let mut out = Vec::new();

        handle_cfg_command(&mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["save_path"]["value"], config::DEFAULT_SAVE_PATH);
        assert_eq!(json["save_path"]["source"], "default");
        assert!(json["seed"]["value"].is_null());
        assert_eq!(json["run"]["value"]["hands_per_pot"], 4);
        assert!(output.contains("\n  "));
    }

    #[test]
    #[serial]
    fn env_seed_is_marked() {
        clear_env();
        unsafe {
            std::env::set_var(config::SEED_ENV, "17");
        }
        let mut out = Vec::new();
        let res = handle_cfg_command(&mut out);
        clear_env();

        assert!(res.is_ok());
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["seed"]["value"], 17);
        assert_eq!(json["seed"]["source"], "env");
    }

    #[test]
    #[serial]
    fn bad_config_is_reported() {
        clear_env();
        unsafe {
            std::env::set_var(config::SEED_ENV, "lots");
        }
        let mut out = Vec::new();
        let res = handle_cfg_command(&mut out);
        clear_env();

        match res {
            Err(CliError::Config(msg)) => assert!(msg.starts_with("Invalid configuration")),
            other => panic!("expected a config error, got {:?}", other),
        }
        assert!(out.is_empty());
    }
}
