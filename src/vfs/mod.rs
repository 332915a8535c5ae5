//! Storage seam between the document engine and wherever files live

pub mod local;
pub mod memory;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use local::LocalStorage;
pub use memory::MemoryStorage;

#[derive(Error, Debug)]
pub enum VfsError {
    #[error("File not found: {0:?}")]
    NotFound(PathBuf),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl VfsError {
    /// Attach `path` to an I/O error, folding `ErrorKind::NotFound` into [`VfsError::NotFound`]
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            VfsError::NotFound(path.to_path_buf())
        } else {
            VfsError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Everything the editor needs from a file system
///
/// Reads and writes always move whole files; there is no partial I/O.
pub trait Storage {
    fn read_all(&self, path: &Path) -> Result<String, VfsError>;
    fn write_all(&self, path: &Path, content: &str) -> Result<(), VfsError>;
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> Result<(), VfsError>;
    fn rename(&self, from: &Path, to: &Path) -> Result<(), VfsError>;
    fn copy(&self, from: &Path, to: &Path) -> Result<(), VfsError>;
    fn remove_file(&self, path: &Path) -> Result<(), VfsError>;
}
