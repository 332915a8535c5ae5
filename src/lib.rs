pub mod error;
pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod settings;
pub mod utils;
pub mod vfs;

// Re-export the main document types for easier access
pub use models::{Document, IniValue, Placement, Section};

// Re-export the file handle and its configuration
pub use error::{IniError, Result};
pub use interfaces::IniFile;
pub use settings::EditorSettings;
