//! Config validation logic.
//! Verifies the destination root, join character, move log path and manifest
//! list before any planning happens. Unlike batch validation this may touch
//! the filesystem (a probe file answers the writability question for real).

use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::types::Config;
use super::{ConfigError, FORBIDDEN_JOIN_CHARS};

/// Validate the config and canonicalize `destination_root`.
///
/// `expect_manifests` is true for stash runs; a restore run reads the
/// destination tree instead and tolerates an empty manifest list.
pub fn validate_and_normalize(cfg: &mut Config, expect_manifests: bool) -> Result<(), ConfigError> {
    ensure_root_usable(&cfg.destination_root)?;

    // Canonical root keeps encoded names and log rows free of `..` and
    // symlink indirection.
    let canonical = dunce::canonicalize(&cfg.destination_root).map_err(|e| {
        ConfigError::DestinationRoot {
            path: cfg.destination_root.clone(),
            problem: format!("cannot canonicalize: {e}"),
        }
    })?;
    cfg.destination_root = canonical;

    if FORBIDDEN_JOIN_CHARS.contains(&cfg.join_char) {
        return Err(ConfigError::JoinChar(format!(
            "'{}' is reserved; pick a character that is legal in filenames",
            cfg.join_char
        )));
    }
    if cfg.destination_root.display().to_string().contains(cfg.join_char) {
        return Err(ConfigError::JoinChar(format!(
            "'{}' appears in destination_root '{}'; encoded names would be ambiguous",
            cfg.join_char,
            cfg.destination_root.display()
        )));
    }

    ensure_move_log_path_free(&cfg.move_log)?;

    if expect_manifests && cfg.manifests.is_empty() {
        return Err(ConfigError::NoManifests);
    }

    info!(
        "Config validated: root='{}' join_char='{}' move_log='{}'",
        cfg.destination_root.display(),
        cfg.join_char,
        cfg.move_log.display()
    );
    Ok(())
}

/// The destination root must exist, be a directory, and be both readable
/// and writable.
fn ensure_root_usable(root: &Path) -> Result<(), ConfigError> {
    let problem = |problem: String| ConfigError::DestinationRoot {
        path: root.to_path_buf(),
        problem,
    };

    if !root.exists() {
        return Err(problem("does not exist".into()));
    }
    if !root.is_dir() {
        return Err(problem("is not a directory".into()));
    }
    fs::read_dir(root).map_err(|e| problem(format!("not readable: {e}")))?;
    is_writable_probe(root).map_err(|e| problem(format!("not writable: {e}")))?;
    debug!(root = %root.display(), "Destination root usable");
    Ok(())
}

/// The move log must not exist yet, and its parent must be a writable
/// directory. Each run writes a fresh log; appending to an old one would
/// mix batches and break undo.
fn ensure_move_log_path_free(log: &Path) -> Result<(), ConfigError> {
    let problem = |problem: String| ConfigError::MoveLog {
        path: log.to_path_buf(),
        problem,
    };

    if fs::symlink_metadata(log).is_ok() {
        return Err(problem(
            "already exists; each run must write a fresh log".into(),
        ));
    }
    let parent = match log.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return Err(problem("has no parent directory".into())),
    };
    if !parent.exists() {
        return Err(problem(format!("parent '{}' does not exist", parent.display())));
    }
    if !parent.is_dir() {
        return Err(problem(format!("parent '{}' is not a directory", parent.display())));
    }
    is_writable_probe(parent)
        .map_err(|e| problem(format!("parent '{}' not writable: {e}", parent.display())))?;
    Ok(())
}

fn is_writable_probe(dir: &Path) -> std::io::Result<()> {
    let probe = dir.join(format!(".flatstash_probe_{}.tmp", std::process::id()));
    match fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&probe)
    {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            Ok(())
        }
        Err(e) => Err(e),
    }
}
