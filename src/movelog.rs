//! The move log: a CSV record of every completed move.
//! Each row maps where a file came from to where it landed, which is
//! exactly the information an undo run needs to plan moves back.

use csv::Writer;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::engine::{BatchReport, MoveStatus};

pub const MOVE_LOG_HEADER: [&str; 2] = ["move_from", "move_to"];

#[derive(Debug, Error)]
pub enum MoveLogError {
    #[error("cannot create move log '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write move log '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Open CSV writer for one run's move log.
///
/// The file is created up front, before any file is touched, so an
/// unwritable log path aborts the run while it is still a no-op.
pub struct MoveLog {
    writer: Writer<File>,
    path: PathBuf,
    rows: usize,
}

impl MoveLog {
    /// Create the log file and write the header row. Refuses to reuse an
    /// existing file: every run gets its own log.
    pub fn create(path: &Path) -> Result<Self, MoveLogError> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| MoveLogError::Create {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut log = MoveLog {
            writer: Writer::from_writer(file),
            path: path.to_path_buf(),
            rows: 0,
        };
        log.write_row(&MOVE_LOG_HEADER)?;
        debug!(path = %log.path.display(), "Move log created");
        Ok(log)
    }

    /// Append one row per successful move in the report, then flush.
    /// Failed moves never appear in the log; restoring them would
    /// fabricate files that were never placed.
    pub fn record_batch(&mut self, report: &BatchReport) -> Result<usize, MoveLogError> {
        let mut written = 0;
        for outcome in &report.outcomes {
            match outcome.status {
                MoveStatus::Moved | MoveStatus::Copied => {
                    self.write_row(&[
                        outcome.source.to_string_lossy().into_owned(),
                        outcome.dest.to_string_lossy().into_owned(),
                    ])?;
                    written += 1;
                }
                MoveStatus::Failed { .. } => {}
            }
        }
        self.writer.flush().map_err(|e| MoveLogError::Write {
            path: self.path.clone(),
            source: csv::Error::from(e),
        })?;
        self.rows += written;
        Ok(written)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_row<T: AsRef<[u8]>>(&mut self, row: &[T]) -> Result<(), MoveLogError> {
        self.writer.write_record(row).map_err(|e| MoveLogError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MoveOutcome;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn outcome(src: &str, dest: &str, status: MoveStatus) -> MoveOutcome {
        MoveOutcome {
            manifest: "batch".to_string(),
            source: PathBuf::from(src),
            dest: PathBuf::from(dest),
            status,
        }
    }

    #[test]
    fn logs_header_and_one_row_per_successful_move() {
        let td = tempdir().unwrap();
        let path = td.path().join("moves.csv");
        let report = BatchReport {
            outcomes: vec![
                outcome("/a/one.txt", "/t/b/a@one.txt", MoveStatus::Moved),
                outcome(
                    "/a/two.txt",
                    "/t/b/a@two.txt",
                    MoveStatus::Failed {
                        reason: "boom".to_string(),
                    },
                ),
                outcome("/a/three.txt", "/t/b/a@three.txt", MoveStatus::Copied),
            ],
        };

        let mut log = MoveLog::create(&path).unwrap();
        let written = log.record_batch(&report).unwrap();

        assert_eq!(written, 2);
        assert_eq!(log.rows(), 2);

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "move_from,move_to");
        assert_eq!(lines[1], "/a/one.txt,/t/b/a@one.txt");
        assert_eq!(lines[2], "/a/three.txt,/t/b/a@three.txt");
    }

    #[test]
    fn refuses_an_existing_log_file() {
        let td = tempdir().unwrap();
        let path = td.path().join("moves.csv");
        fs::write(&path, "leftover").unwrap();

        match MoveLog::create(&path) {
            Err(MoveLogError::Create { path: p, .. }) => assert_eq!(p, path),
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("expected Create error"),
        }
        // The prior run's log is untouched.
        assert_eq!(fs::read_to_string(&path).unwrap(), "leftover");
    }

    #[test]
    fn empty_batch_leaves_just_the_header() {
        let td = tempdir().unwrap();
        let path = td.path().join("moves.csv");

        let mut log = MoveLog::create(&path).unwrap();
        let written = log.record_batch(&BatchReport::default()).unwrap();

        assert_eq!(written, 0);
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), "move_from,move_to");
    }
}
