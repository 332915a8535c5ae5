//! Path helpers for the file lifecycle operations

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process;

/// Path of a file called `name` next to `path`
pub fn sibling_path(path: &Path, name: &str) -> PathBuf {
    match path.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

/// Path of `path`'s file name inside `dir`; `None` when `path` has no file name
pub fn path_in_dir(dir: &Path, path: &Path) -> Option<PathBuf> {
    path.file_name().map(|name| dir.join(name))
}

/// True if `name` is a bare file name with no directory components
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && Path::new(name).file_name().map(|n| n == name).unwrap_or(false)
}

/// Scratch file used for durable writes, e.g. `app.ini` -> `.app.ini.4242.tmp`
/// where `4242` is the current process id
pub fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(
        path.file_name()
            .unwrap_or_else(|| OsStr::new("ordered-ini")),
    );
    name.push(format!(".{}.tmp", process::id()));
    path.with_file_name(name)
}

/// Parent directory of `path`, skipping the empty parent of a bare file name
pub fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}
