// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `ArtifactStore` for Strata (stores artifacts under a root directory).

use std::fs;
use std::path::{Path, PathBuf};

use strata_store::{ArtifactStore, StoreError};

/// Store artifacts as plain files under a root directory.
///
/// Store paths are `/`-separated and relative; they map directly beneath
/// `root`, so the versioned layout `<base>/<token>/<name>` becomes a real
/// directory tree on disk. The struct is `Clone` — clones share the same
/// root, and all state lives on disk.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the root directory cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    /// The on-disk root this store maps paths beneath.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn fs_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

fn io_error(path: &str, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_string(),
        source,
    }
}

impl ArtifactStore for FsStore {
    fn read_bytes(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        match fs::read(self.fs_path(path)) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound {
                path: path.to_string(),
            }),
            Err(err) => Err(io_error(path, err)),
        }
    }

    fn write_bytes(&self, path: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let target = self.fs_path(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|err| io_error(path, err))?;
        }
        fs::write(target, bytes).map_err(|err| io_error(path, err))
    }

    fn exists(&self, path: &str) -> Result<bool, StoreError> {
        self.fs_path(path)
            .try_exists()
            .map_err(|err| io_error(path, err))
    }

    fn list_children(&self, dir: &str) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(self.fs_path(dir)) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(io_error(dir, err)),
        };
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| io_error(dir, err))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FsStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path().join("store")).unwrap();
        (dir, store)
    }

    #[test]
    fn write_read_round_trip() {
        let (_dir, store) = temp_store();
        store.write_bytes("data/records.json", b"payload").unwrap();
        assert_eq!(store.read_bytes("data/records.json").unwrap(), b"payload");
    }

    #[test]
    fn read_missing_is_not_found() {
        let (_dir, store) = temp_store();
        let err = store.read_bytes("absent").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(err.path(), "absent");
    }

    #[test]
    fn write_creates_parent_directories() {
        let (_dir, store) = temp_store();
        store.write_bytes("a/b/c/leaf", b"x").unwrap();
        assert!(store.root().join("a/b/c/leaf").is_file());
    }

    #[test]
    fn exists_for_files_directories_and_missing() {
        let (_dir, store) = temp_store();
        store.write_bytes("base/v1/file", b"x").unwrap();
        assert!(store.exists("base/v1/file").unwrap());
        assert!(store.exists("base/v1").unwrap());
        assert!(store.exists("base").unwrap());
        assert!(!store.exists("base/v2").unwrap());
    }

    #[test]
    fn list_children_sorted() {
        let (_dir, store) = temp_store();
        store.write_bytes("base/v2/file", b"x").unwrap();
        store.write_bytes("base/v1/file", b"x").unwrap();
        store.write_bytes("base/v10/file", b"x").unwrap();
        // Lexicographic, not numeric: v1 < v10 < v2.
        assert_eq!(store.list_children("base").unwrap(), vec!["v1", "v10", "v2"]);
    }

    #[test]
    fn list_children_absent_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.list_children("no/such/dir").unwrap().is_empty());
    }

    #[test]
    fn new_is_idempotent_on_existing_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("store");
        let first = FsStore::new(&root).unwrap();
        first.write_bytes("k", b"v").unwrap();
        let second = FsStore::new(&root).unwrap();
        assert_eq!(second.read_bytes("k").unwrap(), b"v");
    }
}
