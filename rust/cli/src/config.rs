//! Session configuration: defaults, TOML file, environment overrides.

use serde::{Deserialize, Serialize};
use std::fs;

/// One seat in the roster. A seat with a `model` plays through the remote
/// provider; without one it runs the built-in rule policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeatConfig {
    pub name: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub small_blind: u32,
    pub big_blind: u32,
    pub starting_stack: u32,
    pub num_hands: u64,
    pub seed: Option<u64>,
    pub db_path: Option<String>,
    pub seats: Vec<SeatConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            small_blind: 5,
            big_blind: 10,
            starting_stack: 1000,
            num_hands: 10,
            seed: None,
            db_path: None,
            seats: (1..=4)
                .map(|i| SeatConfig {
                    name: format!("player{i}"),
                    model: None,
                    endpoint: None,
                    api_key: None,
                })
                .collect(),
        }
    }
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
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "{msg}"),
        }
    }
}

/// Resolve the session configuration: defaults, then the TOML file named by
/// `POKERMIND_CONFIG` or `--config`, then environment overrides.
pub fn load(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut cfg = Config::default();

    let file_path = path
        .map(|p| p.to_string())
        .or_else(|| std::env::var("POKERMIND_CONFIG").ok());
    if let Some(path) = file_path {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
        }
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
        }
        if let Some(v) = f.num_hands {
            cfg.num_hands = v;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
        }
        if let Some(v) = f.db_path {
            cfg.db_path = Some(v);
        }
        if let Some(v) = f.seats {
            cfg.seats = v;
        }
    }

    if let Ok(seed) = std::env::var("POKERMIND_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
    }
    if let Ok(db) = std::env::var("POKERMIND_DB")
        && !db.is_empty()
    {
        cfg.db_path = Some(db);
    }

    validate(&cfg)?;
    Ok(cfg)
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    num_hands: Option<u64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    db_path: Option<String>,
    #[serde(default)]
    seats: Option<Vec<SeatConfig>>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.small_blind == 0 || cfg.big_blind == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: blinds must be > 0".into(),
        ));
    }
    if cfg.big_blind < cfg.small_blind {
        return Err(ConfigError::Invalid(
            "Invalid configuration: big blind must be >= small blind".into(),
        ));
    }
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be > 0".into(),
        ));
    }
    if cfg.seats.len() < 2 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: at least 2 seats required".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn undersized_roster_is_invalid() {
        let cfg = Config {
            seats: vec![SeatConfig {
                name: "solo".into(),
                model: None,
                endpoint: None,
                api_key: None,
            }],
            ..Config::default()
        };
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn inverted_blinds_are_invalid() {
        let cfg = Config {
            small_blind: 20,
            big_blind: 10,
            ..Config::default()
        };
        assert!(validate(&cfg).is_err());
    }
}
