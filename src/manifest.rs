//! Manifest loading.
//!
//! A manifest is a UTF-8 text file listing absolute source paths, one per
//! line. Its file name (extension included) becomes the name of the group
//! folder under the destination root, so the two halves of a run agree on
//! where each batch of files lives.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A named, ordered group of source files read from one manifest file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceManifest {
    /// File name of the manifest, used as the group folder name.
    pub name: String,
    /// Where the manifest was loaded from.
    pub path: PathBuf,
    /// Listed source paths in file order.
    pub entries: Vec<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot read manifest '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("manifest '{path}' has no usable file name")]
    BadName { path: PathBuf },

    #[error("manifest '{path}' lists no files")]
    Empty { path: PathBuf },

    #[error("manifest '{path}' line {line}: entry '{entry}' is not an absolute path")]
    RelativeEntry {
        path: PathBuf,
        line: usize,
        entry: String,
    },

    #[error("manifest '{path}' line {line}: duplicate entry '{entry}'")]
    DuplicateEntry {
        path: PathBuf,
        line: usize,
        entry: PathBuf,
    },
}

impl SourceManifest {
    /// Read and check a manifest file.
    ///
    /// Blank lines and surrounding whitespace are ignored. Every remaining
    /// line must be an absolute path, and no path may appear twice; an empty
    /// manifest is an error rather than a silent no-op.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_owned)
            .ok_or_else(|| ManifestError::BadName {
                path: path.to_path_buf(),
            })?;

        let text = fs::read_to_string(path).map_err(|source| ManifestError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let mut entries = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if !Path::new(line).is_absolute() {
                return Err(ManifestError::RelativeEntry {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    entry: line.to_string(),
                });
            }
            if !seen.insert(line) {
                return Err(ManifestError::DuplicateEntry {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    entry: PathBuf::from(line),
                });
            }
            entries.push(PathBuf::from(line));
        }

        if entries.is_empty() {
            return Err(ManifestError::Empty {
                path: path.to_path_buf(),
            });
        }

        Ok(SourceManifest {
            name,
            path: path.to_path_buf(),
            entries,
        })
    }
}
