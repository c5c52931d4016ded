//! Typed error definitions for flatstash.
//! Rolls the per-stage failures into one enum the binary can map to an
//! exit code, plus the exit code table itself.

use thiserror::Error;

use crate::config::ConfigError;
use crate::movelog::MoveLogError;
use crate::plan::PlanFailure;
use crate::preflight::PreflightReport;

#[derive(Debug, Error)]
pub enum FlatstashError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Plan(#[from] PlanFailure),

    #[error("validation found {} problem(s); nothing was moved", .report.violations.len())]
    Validation { report: PreflightReport },

    #[error(transparent)]
    MoveLog(#[from] MoveLogError),
}

impl FlatstashError {
    /// Stable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FlatstashError::Config(_) => "config",
            FlatstashError::Plan(_) => "plan",
            FlatstashError::Validation { .. } => "validation",
            FlatstashError::MoveLog(_) => "move_log",
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            FlatstashError::Config(_) => ExitCode::Config,
            FlatstashError::Plan(_) => ExitCode::Plan,
            FlatstashError::Validation { .. } => ExitCode::Validation,
            FlatstashError::MoveLog(_) => ExitCode::MoveLog,
        }
    }
}

/// Process exit codes. Stable so scripts can branch on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    General = 1,
    /// Bad command line; clap also exits with 2 on its own.
    Usage = 2,
    Config = 3,
    Plan = 4,
    Validation = 5,
    MoveLog = 6,
    /// The batch ran, but at least one move failed.
    PartialFailure = 7,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}
