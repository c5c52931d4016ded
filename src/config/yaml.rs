//! YAML configuration support.
//! Loads settings from an explicit file path; there is no default location.
//! The path comes from the CLI or from FLATSTASH_CONFIG.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::types::{Config, LogLevel};
use super::ConfigError;

/// Struct mirroring the YAML config for deserialization.
/// Unknown keys are a hard parse failure so typos surface early.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct YamlConfig {
    destination_root: Option<String>,
    join_char: Option<String>,
    move_log: Option<String>,
    manifests: Option<Vec<String>>,
    copy_instead_of_move: Option<bool>,
    log_level: Option<String>,
    log_file: Option<String>,
}

/// Config path from FLATSTASH_CONFIG, if set.
pub fn config_path_from_env() -> Option<PathBuf> {
    env::var_os(super::CONFIG_ENV_VAR).map(PathBuf::from)
}

/// Load a Config from a specific YAML file path.
pub fn load_config_from_yaml_path(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source: e,
    })?;
    let parsed: YamlConfig = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    yaml_to_config(path, parsed)
}

// Map YamlConfig -> Config, trimming strings and rejecting missing keys.
fn yaml_to_config(path: &Path, parsed: YamlConfig) -> Result<Config, ConfigError> {
    let missing = |key: &'static str| ConfigError::MissingKey {
        path: path.to_path_buf(),
        key,
    };

    let destination_root = parsed
        .destination_root
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| missing("destination_root"))?;

    let join_raw = parsed
        .join_char
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| missing("join_char"))?;
    let mut join_chars = join_raw.chars();
    let join_char = match (join_chars.next(), join_chars.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(ConfigError::JoinChar(format!(
                "'{join_raw}' must be exactly one character"
            )));
        }
    };

    let move_log = parsed
        .move_log
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| missing("move_log"))?;

    let manifests: Vec<PathBuf> = parsed
        .manifests
        .unwrap_or_default()
        .into_iter()
        .map(|s| PathBuf::from(s.trim()))
        .collect();

    let log_level = parsed
        .log_level
        .as_deref()
        .and_then(|s| s.trim().parse::<LogLevel>().ok())
        .unwrap_or_default();

    let log_file = parsed.log_file.as_deref().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    });

    debug!(config = %path.display(), "Loaded config");

    Ok(Config {
        destination_root,
        join_char,
        move_log,
        manifests,
        copy_instead_of_move: parsed.copy_instead_of_move.unwrap_or(false),
        log_level,
        log_file,
    })
}
