//! JSON interchange reader
//!
//! The JSON shape is an object of objects. Scalar values are strings and list
//! values are arrays of strings, e.g. `{"paths": {"root": ".", "include": ["src"]}}`.

use crate::error::Result;
use crate::models::Document;

/// Parse a JSON object of objects into a [`Document`], keeping member order
pub fn parse_json(content: &str) -> Result<Document> {
    let document: Document = serde_json::from_str(content)?;
    document.validate()?;
    Ok(document)
}
