//! Path <-> filename codec.
//!
//! `encode` flattens an absolute path into a single filename by joining its
//! components with a user-chosen join character, dropping the root (and drive
//! prefix on Windows). `decode` is the exact inverse: it splits the name and
//! reattaches the platform root. Because encoding refuses any path that
//! already contains the join character, no two distinct accepted paths can
//! produce the same name, and `decode(encode(p, c), c) == p` always holds.
//!
//! On Windows the decoded path lands on the current drive; round-trips across
//! drives are therefore a documented convention, exact on Unix.

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Failure modes of the codec. Kept comparable so callers can assert on them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("path is not absolute: '{path}'")]
    NotAbsolute { path: PathBuf },

    #[error("path '{path}' already contains the join character '{join_char}'")]
    JoinCharInPath { path: PathBuf, join_char: char },

    #[error("cannot encode '{path}': {reason}")]
    Unencodable { path: PathBuf, reason: String },

    #[error("cannot decode '{name}': {reason}")]
    Undecodable { name: String, reason: String },
}

#[cfg(windows)]
const SEPARATORS: &[char] = &['/', '\\'];
#[cfg(not(windows))]
const SEPARATORS: &[char] = &['/'];

/// Flatten an absolute path into a single filename.
///
/// The root (and drive prefix) is dropped; the remaining components are
/// joined with `join_char`. Errors if the path is relative, is the bare root,
/// contains `.`/`..` components, is not valid UTF-8, or already contains the
/// join character anywhere (which would make the name ambiguous to decode).
pub fn encode(path: &Path, join_char: char) -> Result<String, CodecError> {
    if !path.is_absolute() {
        return Err(CodecError::NotAbsolute {
            path: path.to_path_buf(),
        });
    }

    let Some(text) = path.to_str() else {
        return Err(unencodable(path, "path is not valid UTF-8"));
    };
    if text.contains(join_char) {
        return Err(CodecError::JoinCharInPath {
            path: path.to_path_buf(),
            join_char,
        });
    }

    // components() folds '.' segments away before they can be matched, so
    // dot segments are screened on the raw text.
    for segment in text.split(SEPARATORS) {
        if segment == "." || segment == ".." {
            return Err(unencodable(path, "path contains '.' or '..' components"));
        }
    }

    let mut segments: Vec<&str> = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            Component::Normal(seg) => {
                let seg = seg
                    .to_str()
                    .ok_or_else(|| unencodable(path, "path is not valid UTF-8"))?;
                segments.push(seg);
            }
            Component::CurDir | Component::ParentDir => {
                return Err(unencodable(path, "path contains '.' or '..' components"));
            }
        }
    }

    if segments.is_empty() {
        return Err(unencodable(path, "path has no components besides the root"));
    }

    let sep = join_char.to_string();
    Ok(segments.join(&sep))
}

/// Reconstruct the original absolute path from an encoded filename.
///
/// Splits on `join_char` and pushes each segment onto the platform root.
/// A name without the join character decodes to a root-level path. Errors
/// on empty names, empty segments, `.`/`..` segments, and segments holding
/// a path separator, since no accepted path encodes to those.
pub fn decode(name: &str, join_char: char) -> Result<PathBuf, CodecError> {
    if name.is_empty() {
        return Err(undecodable(name, "name is empty"));
    }

    let mut restored = platform_root();
    for segment in name.split(join_char) {
        if segment.is_empty() {
            return Err(undecodable(name, "name contains an empty segment"));
        }
        if segment == "." || segment == ".." {
            return Err(undecodable(name, "name contains a '.' or '..' segment"));
        }
        if segment.contains(SEPARATORS) {
            return Err(undecodable(name, "segment contains a path separator"));
        }
        restored.push(segment);
    }
    Ok(restored)
}

fn unencodable(path: &Path, reason: &str) -> CodecError {
    CodecError::Unencodable {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn undecodable(name: &str, reason: &str) -> CodecError {
    CodecError::Undecodable {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(not(windows))]
fn platform_root() -> PathBuf {
    PathBuf::from("/")
}

/// Root of the current working drive, e.g. `C:\`. Falls back to `\` when the
/// working directory has no drive prefix (UNC paths).
#[cfg(windows)]
fn platform_root() -> PathBuf {
    if let Ok(cwd) = std::env::current_dir()
        && let Some(Component::Prefix(prefix)) = cwd.components().next()
    {
        let mut root = PathBuf::from(prefix.as_os_str());
        root.push(r"\");
        return root;
    }
    PathBuf::from(r"\")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn encode_joins_components_and_drops_root() {
        let name = encode(Path::new("/photos/family/birthday.jpg"), '@').unwrap();
        assert_eq!(name, "photos@family@birthday.jpg");
    }

    #[test]
    fn encode_root_level_file_is_single_segment() {
        assert_eq!(encode(Path::new("/notes.txt"), '@').unwrap(), "notes.txt");
    }

    #[test]
    fn encode_rejects_relative_path() {
        let err = encode(Path::new("photos/birthday.jpg"), '@').unwrap_err();
        assert!(matches!(err, CodecError::NotAbsolute { .. }));
    }

    #[test]
    fn encode_rejects_bare_root() {
        let err = encode(Path::new("/"), '@').unwrap_err();
        assert!(matches!(err, CodecError::Unencodable { .. }));
    }

    #[test]
    fn encode_rejects_join_char_anywhere_in_path() {
        let err = encode(Path::new("/mail/in@box/msg.eml"), '@').unwrap_err();
        assert_eq!(
            err,
            CodecError::JoinCharInPath {
                path: PathBuf::from("/mail/in@box/msg.eml"),
                join_char: '@',
            }
        );
    }

    #[test]
    fn encode_rejects_dot_components() {
        // '/a/./b.txt' would otherwise flatten to the same name as '/a/b.txt'.
        for p in ["/a/../b.txt", "/a/./b.txt", "/./a.txt", "/a/b/."] {
            assert!(
                matches!(
                    encode(Path::new(p), '@').unwrap_err(),
                    CodecError::Unencodable { .. }
                ),
                "path {p} must not encode"
            );
        }
        assert_eq!(encode(Path::new("/a/b.txt"), '@').unwrap(), "a@b.txt");
    }

    #[test]
    fn decode_is_inverse_of_encode() {
        let original = PathBuf::from("/photos/family/birthday.jpg");
        let name = encode(&original, '@').unwrap();
        assert_eq!(decode(&name, '@').unwrap(), original);
    }

    #[test]
    fn decode_single_segment_lands_at_root() {
        assert_eq!(decode("notes.txt", '@').unwrap(), PathBuf::from("/notes.txt"));
    }

    #[test]
    fn decode_rejects_empty_name_and_empty_segments() {
        assert!(matches!(
            decode("", '@').unwrap_err(),
            CodecError::Undecodable { .. }
        ));
        assert!(matches!(
            decode("a@@b", '@').unwrap_err(),
            CodecError::Undecodable { .. }
        ));
        assert!(matches!(
            decode("@a", '@').unwrap_err(),
            CodecError::Undecodable { .. }
        ));
    }

    #[test]
    fn decode_rejects_dot_segments() {
        assert!(decode("a@..@b", '@').is_err());
        assert!(decode(".@a", '@').is_err());
    }

    #[test]
    fn decode_rejects_separator_in_segment() {
        assert!(decode("a@b/c", '@').is_err());
    }

    #[test]
    fn round_trip_holds_for_varied_paths() {
        let paths = [
            "/tmp/file.bin",
            "/deep/ly/nest.ed/dir/data",
            "/with spaces/and-dashes/x.y.z",
            "/unicode/фото/день-рождения.jpg",
            "/single",
        ];
        for p in paths {
            let original = PathBuf::from(p);
            let name = encode(&original, '@').unwrap();
            assert_eq!(decode(&name, '@').unwrap(), original, "path {p}");
        }
    }

    #[test]
    fn round_trip_with_alternate_join_chars() {
        for c in ['@', '#', '~', '+'] {
            let original = PathBuf::from("/a/b/c.txt");
            assert_eq!(decode(&encode(&original, c).unwrap(), c).unwrap(), original);
        }
    }

    #[test]
    fn distinct_paths_encode_to_distinct_names() {
        let paths = [
            "/a/b/c",
            "/a/b.c",
            "/ab/c",
            "/a/bc",
            "/abc",
            "/a/b/c.txt",
        ];
        let names: HashSet<String> = paths
            .iter()
            .map(|p| encode(Path::new(p), '@').unwrap())
            .collect();
        assert_eq!(names.len(), paths.len());
    }
}
