//! Lookup of generated artifacts in the build-output tree.
//!
//! Cargo places build-script output under `target/release/build/<crate>-<hash>/out`,
//! and the hash is not predictable, so artifacts are found by searching the whole tree
//! for a file with the expected name. Exactly one match is required.

use crate::error::{ReportError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Find the single regular file called `file_name` anywhere under `root`.
pub fn locate(root: &Path, file_name: &str) -> Result<PathBuf> {
    if !root.is_dir() {
        return Err(ReportError::MissingBuildDir(root.to_path_buf()));
    }

    let mut matches: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(root = %root.display(), error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == file_name)
        .map(|entry| entry.into_path())
        .collect();

    match matches.len() {
        0 => Err(ReportError::MissingArtifact {
            name: file_name.to_string(),
            root: root.to_path_buf(),
        }),
        1 => {
            let path = matches.remove(0);
            tracing::debug!(artifact = file_name, path = %path.display(), "located artifact");
            Ok(path)
        }
        _ => {
            matches.sort();
            Err(ReportError::AmbiguousArtifact {
                name: file_name.to_string(),
                matches,
            })
        }
    }
}

/// Resolves test case names to the size of their data file, memoized for one run.
pub struct ArtifactIndex {
    root: PathBuf,
    extension: String,
    sizes: HashMap<String, u64>,
}

impl ArtifactIndex {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
            sizes: HashMap::new(),
        }
    }

    /// File name holding the data for a test case: `random_sp` -> `random-sp.bin`.
    pub fn file_name(&self, test_case: &str) -> String {
        format!("{}.{}", test_case.replace('_', "-"), self.extension)
    }

    /// Size in bytes of the data file for `test_case`.
    pub fn size_of(&mut self, test_case: &str) -> Result<u64> {
        if let Some(&size) = self.sizes.get(test_case) {
            tracing::trace!(test_case, size, "artifact size cached");
            return Ok(size);
        }

        let path = locate(&self.root, &self.file_name(test_case))?;
        let size = std::fs::metadata(&path)
            .map_err(|e| ReportError::io(&path, e))?
            .len();

        self.sizes.insert(test_case.to_string(), size);
        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_artifact(root: &Path, dir: &str, name: &str, len: usize) -> PathBuf {
        let dir = root.join(dir).join("out");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, vec![b's'; len]).unwrap();
        path
    }

    #[test]
    fn should_locate_single_match() {
        let tmp = tempfile::tempdir().unwrap();
        let expected = write_artifact(tmp.path(), "count-0123", "libcount.a", 8);
        assert_eq!(locate(tmp.path(), "libcount.a").unwrap(), expected);
    }

    #[test]
    fn should_fail_when_no_match() {
        let tmp = tempfile::tempdir().unwrap();
        let err = locate(tmp.path(), "libcount.a").unwrap_err();
        assert!(matches!(err, ReportError::MissingArtifact { ref name, .. } if name == "libcount.a"));
    }

    #[test]
    fn should_fail_when_ambiguous() {
        let tmp = tempfile::tempdir().unwrap();
        write_artifact(tmp.path(), "count-aaaa", "random-sp.bin", 4);
        write_artifact(tmp.path(), "count-bbbb", "random-sp.bin", 4);

        let mut index = ArtifactIndex::new(tmp.path(), "bin");
        match index.size_of("random_sp").unwrap_err() {
            ReportError::AmbiguousArtifact { name, matches } => {
                assert_eq!(name, "random-sp.bin");
                assert_eq!(matches.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn should_fail_when_build_dir_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let err = locate(&tmp.path().join("release"), "libcount.a").unwrap_err();
        assert!(matches!(err, ReportError::MissingBuildDir(_)));
    }

    #[test]
    fn should_ignore_directories_with_matching_name() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("random-sp.bin")).unwrap();
        let expected = write_artifact(tmp.path(), "count-0123", "random-sp.bin", 4);
        assert_eq!(locate(tmp.path(), "random-sp.bin").unwrap(), expected);
    }

    #[test]
    fn should_map_test_case_to_hyphenated_file_name() {
        let index = ArtifactIndex::new("target/release/build", "bin");
        assert_eq!(index.file_name("random_printable"), "random-printable.bin");
    }

    #[test]
    fn should_memoize_sizes_when_looked_up_twice() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_artifact(tmp.path(), "count-0123", "random-sp.bin", 1024);

        let mut index = ArtifactIndex::new(tmp.path(), "bin");
        assert_eq!(index.size_of("random_sp").unwrap(), 1024);

        fs::remove_file(path).unwrap();
        assert_eq!(index.size_of("random_sp").unwrap(), 1024);
    }
}
