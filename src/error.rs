//! Error types for the INI editor

use thiserror::Error;

use crate::vfs::VfsError;

/// Result alias used throughout the crate
pub type Result<T, E = IniError> = std::result::Result<T, E>;

/// Errors raised by document operations and the file handle
#[derive(Error, Debug)]
pub enum IniError {
    #[error("Section not found: [{0}]")]
    SectionNotFound(String),

    #[error("Key not found: `{key}` in section [{section}]")]
    KeyNotFound { section: String, key: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Storage(#[from] VfsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] toml::de::Error),
}

impl IniError {
    pub(crate) fn section_not_found(section: &str) -> Self {
        IniError::SectionNotFound(section.to_string())
    }

    pub(crate) fn key_not_found(section: &str, key: &str) -> Self {
        IniError::KeyNotFound {
            section: section.to_string(),
            key: key.to_string(),
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        IniError::InvalidArgument(message.into())
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        IniError::Parse {
            line,
            message: message.into(),
        }
    }

    /// True for every "missing target" error, including a missing file
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            IniError::SectionNotFound(_)
                | IniError::KeyNotFound { .. }
                | IniError::Storage(VfsError::NotFound(_))
        )
    }
}
