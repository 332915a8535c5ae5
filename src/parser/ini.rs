//! INI text parser
//!
//! Accepts the files written by [`crate::generator::ini`] plus the usual
//! hand-written variations: unquoted values, `;`/`#` comment lines, inline
//! `;` comments after unquoted values, a UTF-8 BOM and CRLF line endings.

use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

use crate::error::{IniError, Result};
use crate::models::document::{validate_key_name, validate_section_name};
use crate::models::{Document, IniValue};

lazy_static! {
    static ref SECTION_HEADER: Regex = Regex::new(r"^\[([^\[\]]*)\]\s*(?:[;#].*)?$").unwrap();
    static ref ENTRY_LINE: Regex = Regex::new(r"^([^=\[\]]+?)\s*(\[\])?\s*=\s*(.*)$").unwrap();
}

/// Parse INI text into a [`Document`], keeping section and key order
pub fn parse_ini(content: &str) -> Result<Document> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut document = Document::new();
    let mut current: Option<String> = None;

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(caps) = SECTION_HEADER.captures(line) {
            let name = caps[1].trim();
            validate_section_name(name).map_err(|e| IniError::parse(line_no, e.to_string()))?;
            if document.has_section(name) {
                warn!("Duplicate section [{}] at line {}, merging entries", name, line_no);
            }
            document.entry(name);
            current = Some(name.to_string());
            continue;
        }

        let Some(caps) = ENTRY_LINE.captures(line) else {
            return Err(IniError::parse(line_no, "expected a section header or `key = value`"));
        };
        let Some(section_name) = current.as_deref() else {
            return Err(IniError::parse(line_no, "item exists outside of any section"));
        };

        let key = caps[1].trim();
        validate_key_name(key).map_err(|e| IniError::parse(line_no, e.to_string()))?;
        let value = parse_value(&caps[3]).map_err(|message| IniError::parse(line_no, message))?;

        let section = document.entry(section_name);
        if caps.get(2).is_some() {
            section.push_list_item(key, value);
        } else {
            section.insert(key, IniValue::Scalar(value));
        }
    }

    Ok(document)
}

/// Strip quotes from a quoted value, or trim an unquoted one and cut its inline comment
fn parse_value(raw: &str) -> std::result::Result<String, &'static str> {
    let raw = raw.trim();

    if let Some(rest) = raw.strip_prefix('"') {
        let Some(end) = rest.find('"') else {
            return Err("unterminated quoted value");
        };
        let trailing = rest[end + 1..].trim_start();
        if !trailing.is_empty() && !trailing.starts_with(';') && !trailing.starts_with('#') {
            return Err("unexpected characters after quoted value");
        }
        return Ok(rest[..end].to_string());
    }

    let value = match raw.find(';') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    let value = value.trim_end();
    if value.contains('"') {
        return Err("unexpected quote in unquoted value");
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections_in_order() {
        let content = r#"
; languages
[php]
ide = "phpstorm"
framework = "symfony"
orm = "doctrine"

[java]
ide = eclipse
framework = jee ; inline comment
orm = "hibernate" ; quoted with comment

[ruby]
ide = "rubymine"
framework = "ruby on rails"
orm = "ar"
"#;
        let doc = parse_ini(content).unwrap();
        assert_eq!(doc.section_names().collect::<Vec<_>>(), ["php", "java", "ruby"]);
        assert_eq!(doc.keys("php").unwrap(), ["ide", "framework", "orm"]);
        assert_eq!(doc.value("java", "ide").unwrap(), "eclipse");
        assert_eq!(doc.value("java", "framework").unwrap(), "jee");
        assert_eq!(doc.value("java", "orm").unwrap(), "hibernate");
        assert_eq!(doc.value("ruby", "framework").unwrap(), "ruby on rails");
    }

    #[test]
    fn test_empty_values_and_sections() {
        let doc = parse_ini("[bash]\nide = \"\"\nshell =\n[empty]\n").unwrap();
        assert_eq!(doc.value("bash", "ide").unwrap(), "");
        assert_eq!(doc.value("bash", "shell").unwrap(), "");
        assert!(doc.section("empty").unwrap().is_empty());
    }

    #[test]
    fn test_list_values() {
        let doc = parse_ini("[paths]\ninclude[] = \"src\"\ninclude[] = \"tests\"\nroot = \".\"\n").unwrap();
        assert_eq!(
            doc.value("paths", "include").unwrap(),
            &IniValue::from(vec!["src", "tests"])
        );
        assert_eq!(doc.keys("paths").unwrap(), ["include", "root"]);
    }

    #[test]
    fn test_duplicates_merge_in_place() {
        let doc = parse_ini("[a]\nx = 1\ny = 2\n[b]\nz = 3\n[a]\nx = 9\nw = 4\n").unwrap();
        assert_eq!(doc.section_names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(doc.keys("a").unwrap(), ["x", "y", "w"]);
        assert_eq!(doc.value("a", "x").unwrap(), "9");
    }

    #[test]
    fn test_bom_and_crlf() {
        let doc = parse_ini("\u{feff}[win]\r\nkey = \"value\"\r\n").unwrap();
        assert_eq!(doc.value("win", "key").unwrap(), "value");
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = parse_ini("key = value\n").unwrap_err();
        assert!(matches!(err, IniError::Parse { line: 1, .. }));

        let err = parse_ini("[ok]\n\n[]\n").unwrap_err();
        assert!(matches!(err, IniError::Parse { line: 3, .. }));

        let err = parse_ini("[ok]\nnot an entry\n").unwrap_err();
        assert!(matches!(err, IniError::Parse { line: 2, .. }));

        let err = parse_ini("[ok]\nkey = \"open\n").unwrap_err();
        assert!(matches!(err, IniError::Parse { line: 2, .. }));

        let err = parse_ini("[ok]\nkey = \"a\" b\n").unwrap_err();
        assert!(matches!(err, IniError::Parse { line: 2, .. }));

        let err = parse_ini("[ok]\n\nkey = 5\" screen\n").unwrap_err();
        assert!(matches!(err, IniError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_ini("").unwrap().is_empty());
        assert!(parse_ini("; only a comment\n\n").unwrap().is_empty());
    }
}
