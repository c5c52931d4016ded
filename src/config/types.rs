//! Configuration types shared by the loader, the CLI, and the pipeline.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// User-facing verbosity, mapped onto tracing level filters by the binary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Errors only
    Quiet,
    /// Progress and results
    #[default]
    Normal,
    /// Per-stage detail
    Info,
    /// Everything
    Debug,
}

impl LogLevel {
    /// Case-insensitive parse accepting a few common synonyms.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        })
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Everything one stash or restore run needs to know.
///
/// Deliberately has no Default: a run without a destination root, a join
/// character and a move log path is meaningless, so construction goes
/// through the YAML loader (or a literal in tests).
#[derive(Debug, Clone)]
pub struct Config {
    /// Folder that receives the per-manifest group folders
    pub destination_root: PathBuf,
    /// Character that replaces the path separator in encoded names
    pub join_char: char,
    /// Where this run writes its CSV move log
    pub move_log: PathBuf,
    /// Manifest files naming the files to stash
    pub manifests: Vec<PathBuf>,
    /// If true, leave sources in place and copy instead
    pub copy_instead_of_move: bool,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}
