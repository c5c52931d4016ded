//! Command-line surface.
//!
//! The positional CONFIG names the YAML file; FLATSTASH_CONFIG is consulted
//! when it is omitted. Every flag here overrides the corresponding config
//! value, never the other way around.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use flatstash::{config_path_from_env, default_log_path, Config, LogLevel};

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Consolidate files into one folder with reversible path-encoded names"
)]
pub struct Args {
    /// YAML config file for this run. Falls back to FLATSTASH_CONFIG when omitted.
    #[arg(value_name = "CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Move previously stashed files back to the paths encoded in their names
    #[arg(long)]
    pub undo: bool,

    /// Plan and validate only; do not modify files or directories
    #[arg(long)]
    pub dry_run: bool,

    /// Assume yes at the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Leave sources in place and copy them into the destination
    #[arg(long)]
    pub copy: bool,

    /// Write the CSV move log to PATH instead of the configured path
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub move_log: Option<PathBuf>,

    /// Enable debug logging (shorthand for --log-level debug)
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set log level: quiet, normal, info, debug
    #[arg(long)]
    pub log_level: Option<String>,

    /// Also write logs to PATH (default: OS data dir)
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "")]
    pub log_file: Option<PathBuf>,

    /// Emit logs as structured JSON
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Effective config path: the positional argument wins, else the
    /// environment variable.
    pub fn resolved_config(&self) -> Option<PathBuf> {
        match &self.config {
            Some(p) => Some(strip_quotes(&p.to_string_lossy())),
            None => config_path_from_env(),
        }
    }

    /// Effective log level: --debug beats --log-level; neither set means the
    /// config value stands.
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Fold the flags into a loaded config. Unset flags change nothing.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(path) = &self.move_log {
            cfg.move_log = path.clone();
        }
        if self.copy {
            cfg.copy_instead_of_move = true;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        match &self.log_file {
            // Bare --log-file selects the platform default location.
            Some(p) if p.as_os_str().is_empty() => cfg.log_file = default_log_path(),
            Some(p) => cfg.log_file = Some(p.clone()),
            None => {}
        }
    }
}

// PowerShell and CMD users regularly end up with literal quote characters in
// argv; paths never legitimately contain them, so drop every quote.
fn strip_quotes(raw: &str) -> PathBuf {
    let mut cleaned = raw.trim().to_string();
    cleaned.retain(|c| c != '\'' && c != '"');
    PathBuf::from(cleaned)
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_are_stripped_from_config_paths() {
        assert_eq!(strip_quotes("'/etc/a.yaml'"), PathBuf::from("/etc/a.yaml"));
        assert_eq!(
            strip_quotes(" \"/etc/b.yaml\" "),
            PathBuf::from("/etc/b.yaml")
        );
        assert_eq!(strip_quotes("/plain.yaml"), PathBuf::from("/plain.yaml"));
    }

    #[test]
    fn debug_flag_wins_over_log_level() {
        let args = Args::parse_from(["flatstash", "--debug", "--log-level", "quiet"]);
        assert_eq!(args.effective_log_level(), Some(LogLevel::Debug));
    }
}
