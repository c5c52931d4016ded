//! Error enrichment for filesystem calls.
//!
//! `io_error_with_help` turns a bare io::Error into an anyhow::Error carrying
//! the operation, the path, and a short remedial hint, so a failed outcome
//! tells the user what to do rather than just which errno fired:
//!
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create dir", dir))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

#[cfg(unix)]
fn os_hint(code: i32) -> Option<&'static str> {
    Some(match code {
        libc::EACCES | libc::EPERM => "permission denied; check ownership and write permissions",
        libc::EXDEV => "cross-filesystem; atomic rename not possible",
        libc::ENOENT => "path not found; verify it exists",
        libc::EEXIST => "already exists; the destination must stay untouched",
        libc::ENOSPC => "insufficient space on device",
        libc::EROFS => "read-only filesystem; cannot write here",
        libc::ENAMETOOLONG => "encoded name or path too long for this filesystem",
        _ => return None,
    })
}

#[cfg(windows)]
fn os_hint(code: i32) -> Option<&'static str> {
    Some(match code {
        5 => "access denied; check permissions",
        17 => "not same device; cross-filesystem move",
        2 | 3 => "path not found; verify it exists",
        80 => "already exists; the destination must stay untouched",
        112 => "insufficient disk space",
        206 => "encoded name exceeds MAX_PATH",
        _ => return None,
    })
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    Some(match kind {
        io::ErrorKind::PermissionDenied => {
            "permission denied; check ownership and write permissions"
        }
        io::ErrorKind::NotFound => "path not found; verify it exists",
        io::ErrorKind::AlreadyExists => "already exists; the destination must stay untouched",
        _ => return None,
    })
}

fn describe(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    match e.raw_os_error() {
        Some(code) => {
            if let Some(hint) = os_hint(code) {
                msg.push_str(" — ");
                msg.push_str(hint);
            }
            msg.push_str(&format!(" [os code: {code}]"));
        }
        None => {
            if let Some(hint) = kind_hint(e.kind()) {
                msg.push_str(" — ");
                msg.push_str(hint);
            }
        }
    }
    msg
}

/// Adapter for `.map_err(...)` on io results inside anyhow code paths.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e| anyhow!(describe(op, path, &e))
}
