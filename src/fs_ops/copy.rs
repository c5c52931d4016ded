//! Safe copy helper for cross-filesystem moves:
//! - Streams the source into a temp file in the destination directory
//! - Fsyncs the temp file before it becomes visible
//! - Atomically renames temp -> dest, so no partial file ever appears under
//!   the final name
//! - Cleans the temp file up if the rename fails

use anyhow::{anyhow, Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use super::atomic::try_atomic_rename;
use super::helpers::io_error_with_help;
use super::util;

const BUF_SIZE: usize = 1024 * 1024; // 1 MiB buffers

/// Copy src -> temp in dest dir, then atomic rename temp -> dest.
pub fn safe_copy(src: &Path, dest: &Path) -> Result<()> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| anyhow!("destination has no parent: {}", dest.display()))?;

    fs::create_dir_all(dest_dir)
        .map_err(io_error_with_help("create destination directory", dest_dir))?;

    let tmp_path = util::unique_temp_path(dest_dir);

    if let Err(e) = copy_streaming(src, &tmp_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error_with_help("copy to temporary file", &tmp_path)(e));
    }

    if let Err(e) = try_atomic_rename(&tmp_path, dest) {
        // Best-effort cleanup of the temp file on failure.
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| {
            format!(
                "rename temporary file '{}' -> '{}'",
                tmp_path.display(),
                dest.display()
            )
        });
    }

    Ok(())
}

/// Buffered copy into a newly created file (`create_new`, never clobbers),
/// fsynced before returning so the subsequent rename publishes durable data.
fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_f = File::open(src)?;
    let dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    Ok(bytes)
}
