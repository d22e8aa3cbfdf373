use std::path::{Path, PathBuf};

use crate::config::schema::{Config, Environment};
use crate::error::ConfigError;

const SCHEMA_JSON: &str = include_str!("../../schema/config-v1.json");

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;

    validate_schema(&json_value)?;

    let config: Config = serde_json::from_value(json_value)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_schema(json_value: &serde_json::Value) -> Result<(), ConfigError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| ConfigError::Validation {
        message: format!("Failed to compile JSON schema: {}", e),
    })?;

    let error_messages: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| e.to_string())
        .collect();
    if !error_messages.is_empty() {
        return Err(ConfigError::SchemaValidation {
            errors: error_messages.join("; "),
        });
    }

    Ok(())
}

pub(crate) fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.default_position.trim().is_empty() {
        return Err(ConfigError::Validation {
            message: "default_position must not be empty".to_string(),
        });
    }

    if config.logging.level.trim().is_empty() {
        return Err(ConfigError::Validation {
            message: "logging.level must not be empty".to_string(),
        });
    }

    if config.seed_file.as_os_str().is_empty() {
        return Err(ConfigError::Validation {
            message: "seed_file must not be empty".to_string(),
        });
    }

    Ok(())
}

impl Config {
    /// Applies overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    /// Applies overrides from `lookup`.
    ///
    /// `JOBBOARD_DB_PATH` wins over `DB_PATH`. `RESEED` only turns re-seeding
    /// on; any value other than `true` leaves the configured setting.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(path) = non_empty("JOBBOARD_DB_PATH").or_else(|| non_empty("DB_PATH")) {
            self.database_path = Some(PathBuf::from(path));
        }

        if let Some(path) = non_empty("JOBBOARD_SEED_FILE") {
            self.seed_file = PathBuf::from(path);
        }

        if let Some(value) = non_empty("JOBBOARD_ENV") {
            self.environment = value
                .parse::<Environment>()
                .map_err(|value| ConfigError::InvalidEnv {
                    name: "JOBBOARD_ENV",
                    value,
                })?;
        }

        if non_empty("RESEED").is_some_and(|v| v.trim().eq_ignore_ascii_case("true")) {
            self.reseed = true;
        }

        validate_config(self)
    }
}

/// First existing location of the seed file.
///
/// An absolute path is taken as is. A relative one is tried under `cwd`,
/// then under the parent of `cwd`. When none exists the configured path is
/// returned so the read that follows reports it.
pub fn resolve_seed_path(config: &Config, cwd: &Path) -> PathBuf {
    let configured = &config.seed_file;
    let candidates = if configured.is_absolute() {
        vec![configured.clone()]
    } else {
        let mut dirs = vec![cwd.join(configured)];
        if let Some(parent) = cwd.parent() {
            dirs.push(parent.join(configured));
        }
        dirs
    };

    match candidates.iter().find(|p| p.is_file()) {
        Some(found) => {
            log::debug!("Seed file resolved to {}", found.display());
            found.clone()
        }
        None => {
            log::warn!(
                "Seed file {} not found in {} or its parent",
                configured.display(),
                cwd.display()
            );
            configured.clone()
        }
    }
}
