use std::path::Path;

/// On-disk representation of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFormat {
    #[default]
    Ini,
    Json,
}

impl FileFormat {
    /// Pick the format from the file extension; anything but `.json` is INI
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
            _ => FileFormat::Ini,
        }
    }
}
