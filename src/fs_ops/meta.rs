//! Metadata preservation.
//! Copies timestamps (and the permission mode on Unix) from source to
//! destination after a copy, so the fallback path behaves like a rename.

use anyhow::Result;
use filetime::{set_file_times, FileTime};
use std::fs;
use std::path::Path;

pub fn preserve_metadata(src: &Path, dest: &Path) -> Result<()> {
    let meta = fs::metadata(src)
        .map_err(|e| anyhow::anyhow!("stat {} failed: {}", src.display(), e))?;

    let (atime, mtime) = {
        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            (
                FileTime::from_unix_time(meta.atime(), meta.atime_nsec() as u32),
                FileTime::from_unix_time(meta.mtime(), meta.mtime_nsec() as u32),
            )
        }
        #[cfg(not(unix))]
        {
            (
                FileTime::from_system_time(meta.accessed()?),
                FileTime::from_system_time(meta.modified()?),
            )
        }
    };
    // Timestamps and mode are best-effort: a move that lands with fresh
    // times is still a successful move.
    let _ = set_file_times(dest, atime, mtime);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = meta.permissions().mode() & 0o777;
        if let Ok(dest_meta) = fs::metadata(dest) {
            let mut perms = dest_meta.permissions();
            perms.set_mode(mode);
            let _ = fs::set_permissions(dest, perms);
        }
    }

    Ok(())
}
