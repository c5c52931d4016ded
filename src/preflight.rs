//! Pre-move batch validation.
//!
//! Checks every planned move before anything is touched: sources must be
//! readable regular files, destinations must be free, no two moves may share
//! a destination, and destination parents must be usable. When the run will
//! remove its sources, no two moves may share a source either; a copy run
//! may legitimately fan one source out to several groups. The whole batch is
//! always examined; the report carries one tagged violation per offending
//! move so nothing has to be fixed blind.
//!
//! This stage is strictly read-only. Writability is judged from metadata of
//! the nearest existing ancestor, never by creating probe files, so running
//! it twice over an unchanged tree yields the same report.

use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::engine::MoveAction;
use crate::plan::PlannedMove;

/// How to treat a destination whose parent directory does not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentPolicy {
    /// Missing parents will be created at execution time; an existing,
    /// writable ancestor is enough.
    CreateAsNeeded,
    /// The parent must already exist. Used when restoring, so files only go
    /// back into directories that still exist.
    MustExist,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    SourceMissing,
    SourceNotAFile,
    SourceUnreadable { detail: String },
    DuplicateSource,
    DestinationOccupied,
    DuplicateDestination,
    ParentUnavailable { detail: String },
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationKind::SourceMissing => f.write_str("source file does not exist"),
            ViolationKind::SourceNotAFile => {
                f.write_str("source is not a regular file")
            }
            ViolationKind::SourceUnreadable { detail } => {
                write!(f, "source is not readable: {detail}")
            }
            ViolationKind::DuplicateSource => {
                f.write_str("same source appears more than once in the batch")
            }
            ViolationKind::DestinationOccupied => {
                f.write_str("destination path is already occupied")
            }
            ViolationKind::DuplicateDestination => {
                f.write_str("another move in the batch has the same destination")
            }
            ViolationKind::ParentUnavailable { detail } => {
                write!(f, "destination parent is unavailable: {detail}")
            }
        }
    }
}

/// One violation, tied to the move that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub manifest: String,
    pub source: PathBuf,
    pub dest: PathBuf,
    pub kind: ViolationKind,
}

/// Result of validating a batch. Equal reports mean nothing changed between
/// two validation passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreflightReport {
    /// Number of moves examined.
    pub checked: usize,
    pub violations: Vec<Violation>,
}

impl PreflightReport {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Validate the whole batch, collecting every violation.
pub fn run(
    moves: &[PlannedMove],
    parent_policy: ParentPolicy,
    action: MoveAction,
) -> PreflightReport {
    let mut source_count: HashMap<&Path, usize> = HashMap::new();
    let mut dest_count: HashMap<&Path, usize> = HashMap::new();
    for m in moves {
        *source_count.entry(m.source.as_path()).or_default() += 1;
        *dest_count.entry(m.dest.as_path()).or_default() += 1;
    }

    let mut violations = Vec::new();
    for m in moves {
        let mut push = |kind: ViolationKind| {
            violations.push(Violation {
                manifest: m.manifest.clone(),
                source: m.source.clone(),
                dest: m.dest.clone(),
                kind,
            });
        };

        match fs::symlink_metadata(&m.source) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => push(ViolationKind::SourceMissing),
            Err(e) => push(ViolationKind::SourceUnreadable {
                detail: e.to_string(),
            }),
            Ok(meta) if !meta.is_file() => push(ViolationKind::SourceNotAFile),
            Ok(_) => {
                // Open probe: metadata alone does not prove read permission.
                if let Err(e) = File::open(&m.source) {
                    push(ViolationKind::SourceUnreadable {
                        detail: e.to_string(),
                    });
                }
            }
        }
        // A copy run never removes its sources, so one file may fan out to
        // several groups; only a relocation makes a shared source a conflict.
        if action == MoveAction::Relocate
            && source_count.get(m.source.as_path()).copied().unwrap_or(0) > 1
        {
            push(ViolationKind::DuplicateSource);
        }

        // symlink_metadata so a dangling symlink still counts as occupied.
        if fs::symlink_metadata(&m.dest).is_ok() {
            push(ViolationKind::DestinationOccupied);
        }
        if dest_count.get(m.dest.as_path()).copied().unwrap_or(0) > 1 {
            push(ViolationKind::DuplicateDestination);
        }

        if let Some(detail) = parent_problem(&m.dest, parent_policy) {
            push(ViolationKind::ParentUnavailable { detail });
        }
    }

    debug!(
        checked = moves.len(),
        violations = violations.len(),
        "Preflight finished"
    );
    PreflightReport {
        checked: moves.len(),
        violations,
    }
}

/// Check that the destination's parent can take the file, without creating
/// anything. Returns a human-readable problem, or None when the parent is
/// usable under the given policy.
fn parent_problem(dest: &Path, policy: ParentPolicy) -> Option<String> {
    let Some(parent) = dest.parent() else {
        return Some("destination has no parent directory".to_string());
    };

    let probe: &Path = match policy {
        ParentPolicy::MustExist => {
            if !parent.exists() {
                return Some(format!(
                    "parent directory '{}' does not exist",
                    parent.display()
                ));
            }
            parent
        }
        ParentPolicy::CreateAsNeeded => match nearest_existing_ancestor(parent) {
            Some(a) => a,
            None => {
                return Some(format!(
                    "no existing ancestor for '{}'",
                    parent.display()
                ));
            }
        },
    };

    match fs::metadata(probe) {
        Err(e) => Some(format!("cannot stat '{}': {}", probe.display(), e)),
        Ok(meta) if !meta.is_dir() => {
            Some(format!("'{}' is not a directory", probe.display()))
        }
        Ok(meta) if meta.permissions().readonly() => {
            Some(format!("'{}' is read-only", probe.display()))
        }
        Ok(_) => None,
    }
}

fn nearest_existing_ancestor(path: &Path) -> Option<&Path> {
    let mut candidate = Some(path);
    while let Some(p) = candidate {
        if p.exists() {
            return Some(p);
        }
        candidate = p.parent();
    }
    None
}
