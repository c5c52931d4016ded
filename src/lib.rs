//! Core library for `flatstash`.
//!
//! Consolidates files scattered across a filesystem into one destination
//! folder, encoding each file's original absolute path into its new name so
//! the whole batch can be reversed later. The pieces compose as a pipeline:
//! manifests are loaded, moves are planned, the plan is validated without
//! touching the filesystem, and only then does the engine relocate files.
//! Every stage returns structured results; rendering and prompting live in
//! the binary.

pub mod codec;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs_ops;
pub mod manifest;
pub mod movelog;
pub mod output;
pub mod pipeline;
pub mod plan;
pub mod preflight;
pub mod shutdown;

pub use codec::{decode, encode, CodecError};
pub use config::{
    config_path_from_env, default_log_path, load_config_from_yaml_path, path_has_symlink_ancestor,
    validate_and_normalize, Config, ConfigError, LogLevel, CONFIG_ENV_VAR, FORBIDDEN_JOIN_CHARS,
};
pub use engine::{BatchReport, MoveAction, MoveOutcome, MoveStatus};
pub use errors::{ExitCode, FlatstashError};
pub use manifest::{ManifestError, SourceManifest};
pub use movelog::{MoveLog, MoveLogError, MOVE_LOG_HEADER};
pub use pipeline::{Mode, PlanSummary, RunOutcome, RunSummary};
pub use plan::{plan_restore, plan_stash, PlanFailure, PlanIssue, PlannedMove};
pub use preflight::{ParentPolicy, PreflightReport, Violation, ViolationKind};
