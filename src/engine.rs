//! Sequential move execution.
//! Runs a validated plan one file at a time, best-effort: a failed move is
//! recorded and the batch keeps going, so the report covers every planned
//! move even when some of them go wrong.

use anyhow::Result;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::fs_ops::{
    check_free_space, io_error_with_help, is_cross_device, preserve_metadata, safe_copy,
    try_atomic_rename,
};
use crate::plan::PlannedMove;
use crate::shutdown;

/// What to do with the source file once the destination holds a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveAction {
    /// Relocate the file; the source is gone afterwards.
    Relocate,
    /// Duplicate the file; the source stays in place.
    CopyOnly,
}

/// Terminal state of one planned move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveStatus {
    Moved,
    Copied,
    Failed { reason: String },
}

impl MoveStatus {
    pub fn is_success(&self) -> bool {
        !matches!(self, MoveStatus::Failed { .. })
    }
}

/// One planned move plus what actually happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub manifest: String,
    pub source: PathBuf,
    pub dest: PathBuf,
    pub status: MoveStatus,
}

/// Outcomes for a whole batch, in plan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<MoveOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Execute every planned move in order and report each outcome.
pub fn execute(moves: &[PlannedMove], action: MoveAction) -> BatchReport {
    let mut outcomes = Vec::with_capacity(moves.len());

    for mv in moves {
        let status = if shutdown::is_requested() {
            MoveStatus::Failed {
                reason: "interrupted before this move".to_string(),
            }
        } else if mv.dest.symlink_metadata().is_ok() {
            // Validation saw a free slot; something claimed it since.
            // Refuse rather than clobber.
            MoveStatus::Failed {
                reason: format!("destination '{}' appeared after validation", mv.dest.display()),
            }
        } else {
            match relocate(&mv.source, &mv.dest, action) {
                Ok(status) => status,
                Err(e) => MoveStatus::Failed {
                    reason: format!("{e:#}"),
                },
            }
        };

        match &status {
            MoveStatus::Moved => {
                info!(src = %mv.source.display(), dest = %mv.dest.display(), "Moved file")
            }
            MoveStatus::Copied => {
                info!(src = %mv.source.display(), dest = %mv.dest.display(), "Copied file")
            }
            MoveStatus::Failed { reason } => {
                error!(src = %mv.source.display(), dest = %mv.dest.display(), %reason, "Move failed")
            }
        }

        outcomes.push(MoveOutcome {
            manifest: mv.manifest.clone(),
            source: mv.source.clone(),
            dest: mv.dest.clone(),
            status,
        });
    }

    BatchReport { outcomes }
}

fn relocate(src: &Path, dest: &Path, action: MoveAction) -> Result<MoveStatus> {
    let parent = dest
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Destination missing a parent directory: {}", dest.display()))?;
    std::fs::create_dir_all(parent)
        .map_err(io_error_with_help("create destination directory", parent))?;

    if action == MoveAction::CopyOnly {
        check_free_space(src, parent)?;
        safe_copy(src, dest)?;
        preserve_metadata(src, dest)?;
        return Ok(MoveStatus::Copied);
    }

    match try_atomic_rename(src, dest) {
        Ok(()) => Ok(MoveStatus::Moved),
        Err(e) => {
            #[cfg(unix)]
            let hint: &str = match e.downcast_ref::<io::Error>() {
                Some(ioe) if is_cross_device(ioe) => "cross-filesystem; will copy instead",
                Some(ioe)
                    if ioe.raw_os_error() == Some(libc::EACCES)
                        || ioe.raw_os_error() == Some(libc::EPERM) =>
                {
                    "permission denied; check destination perms"
                }
                _ => "falling back to copy",
            };

            #[cfg(not(unix))]
            let hint: &str = match e.downcast_ref::<io::Error>() {
                Some(ioe) if is_cross_device(ioe) => "cross-filesystem; will copy instead",
                Some(ioe) if ioe.kind() == io::ErrorKind::PermissionDenied => {
                    "permission denied; check destination perms"
                }
                _ => "falling back to copy",
            };

            warn!(error = %e, hint, "Atomic rename failed, using safe copy+rename");
            check_free_space(src, parent)?;
            safe_copy(src, dest)?;
            preserve_metadata(src, dest)?;
            std::fs::remove_file(src).map_err(io_error_with_help("remove original file", src))?;
            Ok(MoveStatus::Moved)
        }
    }
}
