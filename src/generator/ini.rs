//! INI text writer
//!
//! Output layout, one block per section:
//!
//! ```text
//! [name]
//! key = "value"
//! list[] = "first"
//! list[] = "second"
//!
//! ```
//!
//! Every section, empty or not, is followed by one blank line. Values are not
//! escaped; [`Document`] refuses quotes, line breaks and empty lists up front.

use crate::models::{Document, IniValue};

/// Render `document` as INI text
pub fn to_ini(document: &Document) -> String {
    let mut content = String::new();

    for (name, section) in document.iter() {
        content.push_str(&format!("[{}]\n", name));
        for (key, value) in section.iter() {
            match value {
                IniValue::Scalar(s) => content.push_str(&format!("{} = \"{}\"\n", key, s)),
                IniValue::List(items) => {
                    for item in items {
                        content.push_str(&format!("{}[] = \"{}\"\n", key, item));
                    }
                }
            }
        }
        content.push('\n');
    }

    content
}
