//! Input-fileset fingerprinting.
//!
//! A fingerprint identifies one version of the input files: the sorted
//! list of (path, modification time, length). Cached analysis results
//! are keyed by it, so a rerun over unchanged files is free and any
//! file change is picked up on the next check.

use std::path::PathBuf;
use std::time::SystemTime;

use duty_core::error::{DutyError, Result};

/// Identity stamp for a single input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStamp {
    pub path: PathBuf,
    pub modified: SystemTime,
    pub len: u64,
}

/// Identity of one version of the whole input fileset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilesetFingerprint {
    stamps: Vec<FileStamp>,
}

impl FilesetFingerprint {
    /// Stat every path and capture its stamp. Stamps are sorted by path
    /// so that the comparison is independent of argument order.
    ///
    /// Fails with a [`DutyError::FileRead`] naming the first path that
    /// cannot be stat'ed.
    pub fn capture(paths: &[PathBuf]) -> Result<Self> {
        let mut stamps = Vec::with_capacity(paths.len());

        for path in paths {
            let meta = std::fs::metadata(path).map_err(|source| DutyError::FileRead {
                path: path.clone(),
                source,
            })?;
            let modified = meta.modified().map_err(|source| DutyError::FileRead {
                path: path.clone(),
                source,
            })?;
            stamps.push(FileStamp {
                path: path.clone(),
                modified,
                len: meta.len(),
            });
        }

        stamps.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(Self { stamps })
    }

    /// Number of files covered by this fingerprint.
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    /// `true` when the fingerprint covers no files.
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    #[test]
    fn test_capture_empty_fileset() {
        let fp = FilesetFingerprint::capture(&[]).unwrap();
        assert!(fp.is_empty());
        assert_eq!(fp.len(), 0);
    }

    #[test]
    fn test_same_files_equal_fingerprint() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.csv", "1,Alice,DutyOn,2024-01-01 08:00:00\n");

        let first = FilesetFingerprint::capture(std::slice::from_ref(&a)).unwrap();
        let second = FilesetFingerprint::capture(std::slice::from_ref(&a)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_order_independent() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.csv", "x\n");
        let b = write_file(&dir, "b.csv", "y\n");

        let forward = FilesetFingerprint::capture(&[a.clone(), b.clone()]).unwrap();
        let reversed = FilesetFingerprint::capture(&[b, a]).unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_changed_content_changes_fingerprint() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.csv", "1,Alice,DutyOn,2024-01-01 08:00:00\n");

        let before = FilesetFingerprint::capture(std::slice::from_ref(&a)).unwrap();

        // Append a row: the length changes even when mtime granularity
        // is too coarse to observe.
        let mut file = std::fs::OpenOptions::new().append(true).open(&a).unwrap();
        writeln!(file, "2,Alice,DutyOff,2024-01-01 17:00:00").unwrap();

        let after = FilesetFingerprint::capture(std::slice::from_ref(&a)).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn test_different_filesets_differ() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.csv", "x\n");
        let b = write_file(&dir, "b.csv", "x\n");

        let only_a = FilesetFingerprint::capture(std::slice::from_ref(&a)).unwrap();
        let both = FilesetFingerprint::capture(&[a, b]).unwrap();
        assert_ne!(only_a, both);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.csv");

        let err = FilesetFingerprint::capture(&[missing]).unwrap_err();
        match err {
            DutyError::FileRead { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected FileRead, got {other:?}"),
        }
    }
}
