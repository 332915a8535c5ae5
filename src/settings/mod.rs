//! Editor settings
//!
//! Loaded from TOML; every field is optional:
//!
//! ```toml
//! create_missing = true
//! durable_writes = false
//! rename_moves_to_end = false
//! log_level = "warn"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::vfs::VfsError;

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Create the file (and its parent directories) when opening a missing path
    #[serde(default = "default_true")]
    pub create_missing: bool,
    /// Write through a temp file and rename it over the target
    pub durable_writes: bool,
    /// Legacy behaviour: a renamed section or key moves to the end
    pub rename_moves_to_end: bool,
    /// Default `env_logger` filter for the command line tool
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            create_missing: default_true(),
            durable_writes: false,
            rename_moves_to_end: false,
            log_level: default_log_level(),
        }
    }
}

impl EditorSettings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| VfsError::from_io(path, e))?;
        Self::from_toml_str(&content)
    }
}
