//! Rename with context and durability.
//!
//! rename(2) replaces an existing destination on Unix, so callers check the
//! destination themselves first; the engine does this right before each move.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn try_atomic_rename(src: &Path, dst: &Path) -> Result<()> {
    fs::rename(src, dst)
        .with_context(|| format!("atomic rename '{}' -> '{}'", src.display(), dst.display()))?;

    // Persist the directory entry; a failed fsync must not undo a rename
    // that already happened, so the result is ignored.
    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        let _ = super::util::fsync_dir(parent);
    }

    Ok(())
}
