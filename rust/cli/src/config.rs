//! Layered CLI configuration: built-in defaults, then the TOML file named by
//! `WHALE_CONFIG`, then the `WHALE_SEED` and `WHALE_SAVE` environment
//! variables. Every resolved value remembers which layer set it.
//!
//! ```toml
//! seed = 42
//! save_path = "saves/run.json"
//! history_path = "logs/hands.jsonl"
//!
//! [run]
//! hands_per_pot = 5
//! base_pot_target = 250
//! ```

use serde::{Deserialize, Serialize};
use std::fs;

use whale_engine::engine::RunConfig;

pub const CONFIG_ENV: &str = "WHALE_CONFIG";
pub const SEED_ENV: &str = "WHALE_SEED";
pub const SAVE_ENV: &str = "WHALE_SAVE";

pub const DEFAULT_SAVE_PATH: &str = "data/whale_save.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub save_path: String,
    /// JSONL hand history; `None` disables it
    pub history_path: Option<String>,
    pub run: RunConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            save_path: DEFAULT_SAVE_PATH.into(),
            history_path: None,
            run: RunConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub save_path: ValueSource,
    pub history_path: ValueSource,
    pub run: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            save_path: ValueSource::Default,
            history_path: ValueSource::Default,
            run: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.save_path {
            cfg.save_path = v;
            sources.save_path = ValueSource::File;
        }
        if let Some(v) = f.history_path {
            cfg.history_path = Some(v);
            sources.history_path = ValueSource::File;
        }
        if let Some(v) = f.run {
            cfg.run = v;
            sources.run = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed '{}'", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(path) = std::env::var(SAVE_ENV)
        && !path.is_empty()
    {
        cfg.save_path = path;
        sources.save_path = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

/// The `[run]` table may be partial; missing keys keep their defaults.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    save_path: Option<String>,
    #[serde(default)]
    history_path: Option<String>,
    #[serde(default)]
    run: Option<RunConfig>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.save_path.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: save_path must not be empty".into(),
        ));
    }
    cfg.run
        .validate()
        .map_err(|e| ConfigError::Invalid(e.to_string()))
}
