//! JSON interchange writer

use crate::error::Result;
use crate::models::Document;

/// Render `document` as pretty-printed JSON, members in declaration order
pub fn to_json(document: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}
