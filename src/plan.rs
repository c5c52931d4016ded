//! Batch planning.
//!
//! Turns configuration into a list of `PlannedMove`s. The forward direction
//! reads every manifest and encodes every listed path; the restore direction
//! scans the destination tree and decodes every stashed file name back to its
//! original location. Planning never mutates anything and never stops at the
//! first problem: all issues across the whole batch are collected into one
//! `PlanFailure` so users can fix everything in a single pass.

use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::codec::{self, CodecError};
use crate::config::Config;
use crate::manifest::{ManifestError, SourceManifest};

/// One file relocation: `source` is moved (or copied) to `dest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    /// Name of the manifest group this move belongs to.
    pub manifest: String,
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// A single problem found while planning.
#[derive(Debug, Error)]
pub enum PlanIssue {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("manifest '{manifest}': {error}")]
    Encode {
        manifest: String,
        #[source]
        error: CodecError,
    },

    #[error("manifest name '{manifest}' contains the join character '{join_char}'")]
    NameConflict { manifest: String, join_char: char },

    #[error("cannot scan '{path}': {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("'{path}' is not a group folder")]
    StrayEntry { path: PathBuf },

    #[error("'{path}' in group '{group}' is not a regular file")]
    StrayChild { group: String, path: PathBuf },

    #[error("group folder '{path}' holds no files")]
    EmptyGroup { path: PathBuf },

    #[error("group '{group}': {error}")]
    Decode {
        group: String,
        #[source]
        error: CodecError,
    },
}

/// Exhaustive planning failure: every issue found across the batch.
#[derive(Debug, Error)]
#[error("planning failed with {} issue(s)", .issues.len())]
pub struct PlanFailure {
    pub issues: Vec<PlanIssue>,
}

/// Plan the forward consolidation.
///
/// For every entry of every configured manifest the destination is
/// `destination_root / <manifest name> / <encoded source path>`.
pub fn plan_stash(cfg: &Config) -> Result<Vec<PlannedMove>, PlanFailure> {
    let mut issues = Vec::new();
    let mut moves = Vec::new();

    for manifest_path in &cfg.manifests {
        let manifest = match SourceManifest::load(manifest_path) {
            Ok(m) => m,
            Err(e) => {
                issues.push(PlanIssue::Manifest(e));
                continue;
            }
        };

        if manifest.name.contains(cfg.join_char) {
            issues.push(PlanIssue::NameConflict {
                manifest: manifest.name,
                join_char: cfg.join_char,
            });
            continue;
        }

        let group_dir = cfg.destination_root.join(&manifest.name);
        for source in &manifest.entries {
            match codec::encode(source, cfg.join_char) {
                Ok(encoded) => moves.push(PlannedMove {
                    manifest: manifest.name.clone(),
                    source: source.clone(),
                    dest: group_dir.join(encoded),
                }),
                Err(error) => issues.push(PlanIssue::Encode {
                    manifest: manifest.name.clone(),
                    error,
                }),
            }
        }
    }

    debug!(
        moves = moves.len(),
        issues = issues.len(),
        "Planned consolidation batch"
    );
    if issues.is_empty() {
        Ok(moves)
    } else {
        Err(PlanFailure { issues })
    }
}

/// Plan the reverse operation from the destination tree.
///
/// Every direct child of the destination root must be a group folder, every
/// child of a group folder a regular file whose name decodes back to the
/// original absolute path. Source and destination swap roles: the stashed
/// file is the source, the decoded path the destination.
pub fn plan_restore(cfg: &Config) -> Result<Vec<PlannedMove>, PlanFailure> {
    let mut issues = Vec::new();
    let mut moves = Vec::new();

    for entry in WalkDir::new(&cfg.destination_root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(source) => {
                issues.push(PlanIssue::Scan {
                    path: cfg.destination_root.clone(),
                    source,
                });
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            issues.push(PlanIssue::StrayEntry {
                path: entry.into_path(),
            });
            continue;
        }

        let group = entry.file_name().to_string_lossy().into_owned();
        let group_path = entry.into_path();
        let planned_before = moves.len();
        let mut children = 0usize;

        for child in WalkDir::new(&group_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let child = match child {
                Ok(c) => c,
                Err(source) => {
                    issues.push(PlanIssue::Scan {
                        path: group_path.clone(),
                        source,
                    });
                    continue;
                }
            };
            children += 1;
            if !child.file_type().is_file() {
                issues.push(PlanIssue::StrayChild {
                    group: group.clone(),
                    path: child.into_path(),
                });
                continue;
            }

            let file_name = child.file_name().to_string_lossy().into_owned();
            let Some(name) = child.file_name().to_str() else {
                issues.push(PlanIssue::Decode {
                    group: group.clone(),
                    error: CodecError::Undecodable {
                        name: file_name,
                        reason: "file name is not valid UTF-8".to_string(),
                    },
                });
                continue;
            };
            match codec::decode(name, cfg.join_char) {
                Ok(original) => moves.push(PlannedMove {
                    manifest: group.clone(),
                    source: child.into_path(),
                    dest: original,
                }),
                Err(error) => issues.push(PlanIssue::Decode {
                    group: group.clone(),
                    error,
                }),
            }
        }

        if children == 0 {
            issues.push(PlanIssue::EmptyGroup { path: group_path });
        }
        debug!(group = %group, files = moves.len() - planned_before, "Scanned group folder");
    }

    if issues.is_empty() {
        Ok(moves)
    } else {
        Err(PlanFailure { issues })
    }
}
