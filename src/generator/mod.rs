//! Writers that render a [`Document`](crate::models::Document) back to text

pub mod ini;
pub mod json;

pub use ini::to_ini;
pub use json::to_json;

use crate::error::Result;
use crate::models::Document;
use crate::parser::FileFormat;

pub fn render(document: &Document, format: FileFormat) -> Result<String> {
    match format {
        FileFormat::Ini => Ok(to_ini(document)),
        FileFormat::Json => to_json(document),
    }
}
