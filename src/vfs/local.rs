use std::fs;
use std::io;
use std::path::Path;

use log::debug;

use super::{Storage, VfsError};
use crate::utils::file::temp_sibling;

/// Storage backed by the local file system
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    durable: bool,
}

impl LocalStorage {
    /// `durable` writes go to a sibling temp file that is renamed over the target
    pub fn new(durable: bool) -> Self {
        Self { durable }
    }

    pub fn is_durable(&self) -> bool {
        self.durable
    }
}

impl Storage for LocalStorage {
    fn read_all(&self, path: &Path) -> Result<String, VfsError> {
        fs::read_to_string(path).map_err(|e| VfsError::from_io(path, e))
    }

    fn write_all(&self, path: &Path, content: &str) -> Result<(), VfsError> {
        if !self.durable {
            debug!("Writing {} bytes to {:?}", content.len(), path);
            return fs::write(path, content).map_err(|e| VfsError::from_io(path, e));
        }

        let temp = temp_sibling(path);
        debug!("Writing {} bytes to {:?} via {:?}", content.len(), path, temp);
        fs::write(&temp, content).map_err(|e| VfsError::from_io(&temp, e))?;
        fs::rename(&temp, path).map_err(|e| {
            let _ = fs::remove_file(&temp);
            VfsError::from_io(path, e)
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), VfsError> {
        fs::create_dir_all(path).map_err(|e| VfsError::from_io(path, e))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), VfsError> {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) if crosses_devices(&e) => {
                debug!("Moving {:?} to {:?} across devices", from, to);
                self.copy(from, to)?;
                self.remove_file(from)
            }
            Err(e) => Err(VfsError::from_io(from, e)),
        }
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), VfsError> {
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| VfsError::from_io(from, e))
    }

    fn remove_file(&self, path: &Path) -> Result<(), VfsError> {
        fs::remove_file(path).map_err(|e| VfsError::from_io(path, e))
    }
}

/// `rename(2)` cannot move files between mounts
fn crosses_devices(e: &io::Error) -> bool {
    #[cfg(unix)]
    const EXDEV: i32 = 18;
    #[cfg(windows)]
    const EXDEV: i32 = 17; // ERROR_NOT_SAME_DEVICE
    #[cfg(not(any(unix, windows)))]
    const EXDEV: i32 = -1;

    e.raw_os_error() == Some(EXDEV)
}
