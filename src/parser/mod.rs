//! Readers that turn stored text into a [`Document`](crate::models::Document)

pub mod ini;
pub mod json;
pub mod types;

pub use ini::parse_ini;
pub use json::parse_json;
pub use types::FileFormat;

use crate::error::Result;
use crate::models::Document;

/// Parse `content` in the given format. Blank content is an empty document.
pub fn parse(content: &str, format: FileFormat) -> Result<Document> {
    if content.trim().is_empty() {
        return Ok(Document::new());
    }
    match format {
        FileFormat::Ini => parse_ini(content),
        FileFormat::Json => parse_json(content),
    }
}
