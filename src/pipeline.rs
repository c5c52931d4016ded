//! One run end to end: plan, validate, confirm, execute, log.
//! The confirmation gate is an injected callback, so the binary can wire it
//! to stdin while tests and other callers answer programmatically.

use tracing::{debug, info};

use crate::config::Config;
use crate::engine::{self, BatchReport, MoveAction};
use crate::errors::FlatstashError;
use crate::movelog::MoveLog;
use crate::plan::{plan_restore, plan_stash, PlannedMove};
use crate::preflight::{self, ParentPolicy};

/// Direction of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Consolidate manifest entries into the destination root.
    Stash,
    /// Scan the destination root and move everything back.
    Restore,
}

impl Mode {
    pub fn verb(&self) -> &'static str {
        match self {
            Mode::Stash => "stash",
            Mode::Restore => "restore",
        }
    }
}

/// What the user is asked to confirm: the shape of the batch, not every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSummary {
    pub mode: Mode,
    pub action: MoveAction,
    pub total: usize,
    /// Per-group counts in first-seen order.
    pub per_manifest: Vec<(String, usize)>,
}

impl PlanSummary {
    fn from_plan(mode: Mode, action: MoveAction, moves: &[PlannedMove]) -> Self {
        let mut per_manifest: Vec<(String, usize)> = Vec::new();
        for mv in moves {
            match per_manifest.iter_mut().find(|(name, _)| name == &mv.manifest) {
                Some((_, count)) => *count += 1,
                None => per_manifest.push((mv.manifest.clone(), 1)),
            }
        }
        PlanSummary {
            mode,
            action,
            total: moves.len(),
            per_manifest,
        }
    }
}

/// How far a run got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Validation passed; stopped on request before touching anything.
    DryRun { summary: PlanSummary },
    /// The user answered no at the confirmation gate.
    Declined,
    /// The batch ran; the report covers every planned move.
    Executed { report: BatchReport, logged: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub mode: Mode,
    pub planned: Vec<PlannedMove>,
    pub outcome: RunOutcome,
}

/// Run one batch. `confirm` is consulted exactly once, after validation
/// passes and only when this is not a dry run.
pub fn run<F>(
    cfg: &Config,
    mode: Mode,
    dry_run: bool,
    confirm: F,
) -> Result<RunSummary, FlatstashError>
where
    F: FnOnce(&PlanSummary) -> bool,
{
    let planned = match mode {
        Mode::Stash => plan_stash(cfg)?,
        Mode::Restore => plan_restore(cfg)?,
    };
    info!(mode = mode.verb(), planned = planned.len(), "Planned batch");

    // Restoring must not recreate directory trees the user has since
    // reorganized; stashing builds its own group folders.
    let policy = match mode {
        Mode::Stash => ParentPolicy::CreateAsNeeded,
        Mode::Restore => ParentPolicy::MustExist,
    };
    let action = if mode == Mode::Stash && cfg.copy_instead_of_move {
        MoveAction::CopyOnly
    } else {
        MoveAction::Relocate
    };
    let report = preflight::run(&planned, policy, action);
    if !report.passed() {
        return Err(FlatstashError::Validation { report });
    }
    debug!(checked = report.checked, "Validation passed");

    let summary = PlanSummary::from_plan(mode, action, &planned);

    if dry_run {
        info!("Dry run; stopping before any file is touched");
        return Ok(RunSummary {
            mode,
            planned,
            outcome: RunOutcome::DryRun { summary },
        });
    }

    if !confirm(&summary) {
        info!("Confirmation declined; nothing moved");
        return Ok(RunSummary {
            mode,
            planned,
            outcome: RunOutcome::Declined,
        });
    }

    // The log is opened before the first move so an unwritable log path
    // aborts the run while it is still a no-op.
    let mut log = MoveLog::create(&cfg.move_log)?;
    let report = engine::execute(&planned, action);
    let logged = log.record_batch(&report)?;
    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        logged,
        "Batch finished"
    );

    Ok(RunSummary {
        mode,
        planned,
        outcome: RunOutcome::Executed { report, logged },
    })
}
