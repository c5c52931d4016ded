//! Cooperative interrupt flag.
//! The signal handler sets it; the engine polls it between files, so an
//! interrupted batch ends on a file boundary with a complete report.

use std::sync::atomic::{AtomicBool, Ordering};

// One-way flag; Relaxed ordering is enough for a stop signal.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Ask the batch to stop after the current file. Signal-handler safe.
#[inline]
pub fn request() {
    INTERRUPTED.store(true, Ordering::Relaxed);
}

#[inline]
pub fn is_requested() -> bool {
    INTERRUPTED.load(Ordering::Relaxed)
}

/// Test-only: clear the flag between cases.
#[cfg(test)]
#[inline]
pub fn reset() {
    INTERRUPTED.store(false, Ordering::Relaxed);
}
