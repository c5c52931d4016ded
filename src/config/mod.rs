//! Config module (modularized).
//! Provides configuration types, default paths, YAML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod yaml;

use std::path::PathBuf;
use thiserror::Error;

pub use paths::{default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use validate::validate_and_normalize;
pub use yaml::{config_path_from_env, load_config_from_yaml_path};

/// Environment variable naming the config file when no CLI path is given.
pub const CONFIG_ENV_VAR: &str = "FLATSTASH_CONFIG";

/// Characters that can never serve as the join character. Most are illegal
/// in filenames on at least one supported platform; the path separators
/// would make encoded names ambiguous everywhere.
pub const FORBIDDEN_JOIN_CHARS: &[char] = &['"', '<', '>', ':', '/', '\\', '|', '?', '*'];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config file '{path}' is missing required key '{key}'")]
    MissingKey { path: PathBuf, key: &'static str },

    #[error("invalid join_char: {0}")]
    JoinChar(String),

    #[error("destination_root '{path}': {problem}")]
    DestinationRoot { path: PathBuf, problem: String },

    #[error("move_log '{path}': {problem}")]
    MoveLog { path: PathBuf, problem: String },

    #[error("no manifests configured; nothing to do")]
    NoManifests,
}
