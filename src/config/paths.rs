//! Log path helpers: the platform default location and the symlink-ancestor
//! walk that gates file logging.

use dirs::data_dir;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default log file, under the platform data dir. The directory is created
/// best-effort; callers handle an unwritable path later.
pub fn default_log_path() -> Option<PathBuf> {
    let base = data_dir().or_else(|| {
        std::env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join(".local").join("share"))
    })?;
    let dir = base.join("flatstash");
    let _ = fs::create_dir_all(&dir);
    Some(dir.join("flatstash.log"))
}

/// True when any existing ancestor of `path` is a symlink. Logging through a
/// symlinked directory could be redirected anywhere, so the logger refuses.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut ancestor = path.parent();
    while let Some(dir) = ancestor {
        if dir.exists() && fs::symlink_metadata(dir)?.file_type().is_symlink() {
            return Ok(true);
        }
        ancestor = dir.parent();
    }
    Ok(false)
}
