//! Destination free-space check.
//! Compares the source file size against the space available on the
//! destination filesystem before a copy is attempted.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

pub fn check_free_space(src: &Path, dest_dir: &Path) -> Result<()> {
    let needed = fs::metadata(src)
        .with_context(|| format!("stat '{}'", src.display()))?
        .len();

    let available = fs2::available_space(dest_dir)
        .with_context(|| format!("query free space for '{}'", dest_dir.display()))?;

    if u128::from(needed) > u128::from(available) {
        bail!(
            "insufficient space on destination '{}': need {} bytes, have {} bytes",
            dest_dir.display(),
            needed,
            available
        );
    }
    Ok(())
}
