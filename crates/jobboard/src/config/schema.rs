use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::canonical::DEFAULT_POSITION;
use crate::db::default_database_path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Unset means the per-user default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
    #[serde(default = "default_seed_file")]
    pub seed_file: PathBuf,
    #[serde(default = "default_position")]
    pub default_position: String,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub reseed: bool,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_seed_file() -> PathBuf {
    PathBuf::from("mockdata.txt")
}

fn default_position() -> String {
    DEFAULT_POSITION.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            seed_file: default_seed_file(),
            default_position: default_position(),
            environment: Environment::default(),
            reseed: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Configured database path, or `~/.jobboard/data/jobboard.db`.
    ///
    /// Falls back to a relative `jobboard.db` when no home directory exists.
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .or_else(default_database_path)
            .unwrap_or_else(|| PathBuf::from("jobboard.db"))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}
