use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use log::debug;

use super::{Storage, VfsError};

/// In-memory storage for tests and dry runs
///
/// Directories are tracked only so that `exists` answers for them; writing a
/// file does not require its parent to exist.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: RwLock<BTreeMap<PathBuf, String>>,
    dirs: RwLock<BTreeSet<PathBuf>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage seeded with one file
    pub fn with_file(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let storage = Self::new();
        storage
            .files
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.into(), content.into());
        storage
    }

    /// Paths of all stored files, sorted
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect()
    }
}

impl Storage for MemoryStorage {
    fn read_all(&self, path: &Path) -> Result<String, VfsError> {
        self.files
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .cloned()
            .ok_or_else(|| VfsError::NotFound(path.to_path_buf()))
    }

    fn write_all(&self, path: &Path, content: &str) -> Result<(), VfsError> {
        debug!("Writing {} bytes to memory:{:?}", content.len(), path);
        self.files
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(path)
            || self
                .dirs
                .read()
                .unwrap_or_else(|e| e.into_inner())
                .contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), VfsError> {
        let mut dirs = self.dirs.write().unwrap_or_else(|e| e.into_inner());
        for ancestor in path.ancestors().filter(|p| !p.as_os_str().is_empty()) {
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), VfsError> {
        let mut files = self.files.write().unwrap_or_else(|e| e.into_inner());
        let content = files
            .remove(from)
            .ok_or_else(|| VfsError::NotFound(from.to_path_buf()))?;
        files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), VfsError> {
        let content = self.read_all(from)?;
        self.write_all(to, &content)
    }

    fn remove_file(&self, path: &Path) -> Result<(), VfsError> {
        self.files
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| VfsError::NotFound(path.to_path_buf()))
    }
}
