//! Ordered INI document
//!
//! A [`Document`] is a plain value: every query and mutation here is pure and
//! never touches storage. Loading and saving live in [`crate::interfaces`].

use linked_hash_map::LinkedHashMap;
use serde::{Deserialize, Serialize};

use super::ordering::{self, Placement};
use super::section::Section;
use super::value::IniValue;
use crate::error::{IniError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    sections: LinkedHashMap<String, Section>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section names in declaration order
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn has_key(&self, section: &str, key: &str) -> bool {
        self.sections
            .get(section)
            .map(|s| s.contains_key(key))
            .unwrap_or(false)
    }

    pub fn section(&self, name: &str) -> Result<&Section> {
        self.sections
            .get(name)
            .ok_or_else(|| IniError::section_not_found(name))
    }

    pub fn value(&self, section: &str, key: &str) -> Result<&IniValue> {
        self.section(section)?
            .get(key)
            .ok_or_else(|| IniError::key_not_found(section, key))
    }

    /// Keys of `section` in declaration order
    pub fn keys(&self, section: &str) -> Result<Vec<&str>> {
        Ok(self.section(section)?.keys().collect())
    }

    pub fn section_index(&self, name: &str) -> Option<usize> {
        ordering::index_of(&self.sections, name)
    }

    pub fn key_index(&self, section: &str, key: &str) -> Option<usize> {
        self.sections.get(section)?.key_index(key)
    }

    pub fn has_next_section(&self, name: &str) -> bool {
        self.next_section(name).is_some()
    }

    pub fn has_previous_section(&self, name: &str) -> bool {
        self.previous_section(name).is_some()
    }

    pub fn next_section(&self, name: &str) -> Option<(&str, &Section)> {
        ordering::next_of(&self.sections, name)
    }

    pub fn previous_section(&self, name: &str) -> Option<(&str, &Section)> {
        ordering::previous_of(&self.sections, name)
    }

    pub fn has_next_key(&self, section: &str, key: &str) -> bool {
        self.next_key(section, key).is_some()
    }

    pub fn has_previous_key(&self, section: &str, key: &str) -> bool {
        self.previous_key(section, key).is_some()
    }

    pub fn next_key(&self, section: &str, key: &str) -> Option<(&str, &IniValue)> {
        self.sections.get(section)?.next_key(key)
    }

    pub fn previous_key(&self, section: &str, key: &str) -> Option<(&str, &IniValue)> {
        self.sections.get(section)?.previous_key(key)
    }

    // ---------------------------------------------------------------------
    // Section mutations
    // ---------------------------------------------------------------------

    /// Create `name` as an empty section, or reset it in place if it exists.
    pub fn set_section(&mut self, name: &str) -> Result<()> {
        self.set_section_with(name, Section::new())
    }

    /// Create or replace `name` with `contents`. A new section is appended;
    /// an existing one keeps its position.
    pub fn set_section_with(&mut self, name: &str, contents: Section) -> Result<()> {
        validate_section_name(name)?;
        for (key, value) in contents.iter() {
            validate_key_name(key)?;
            validate_value(value)?;
        }
        match self.sections.get_mut(name) {
            Some(slot) => *slot = contents,
            None => {
                self.sections.insert(name.to_string(), contents);
            }
        }
        Ok(())
    }

    pub fn remove_section(&mut self, name: &str) -> Result<Section> {
        self.sections
            .remove(name)
            .ok_or_else(|| IniError::section_not_found(name))
    }

    /// Rename `old` to `new`, keeping its position
    pub fn rename_section(&mut self, old: &str, new: &str) -> Result<()> {
        self.section(old)?;
        if old == new {
            return Ok(());
        }
        validate_section_name(new)?;
        if self.has_section(new) {
            return Err(IniError::invalid(format!("section [{}] already exists", new)));
        }
        ordering::rename_in_place(&mut self.sections, old, new);
        Ok(())
    }

    pub fn move_section(&mut self, name: &str, placement: Placement<'_>) -> Result<()> {
        self.section(name)?;
        if let Placement::Before(pivot) | Placement::After(pivot) = placement {
            self.section(pivot)?;
            if pivot == name {
                return Err(IniError::invalid(format!(
                    "section [{}] cannot be moved relative to itself",
                    name
                )));
            }
        }
        ordering::reposition(&mut self.sections, name, placement);
        Ok(())
    }

    pub fn move_section_before(&mut self, name: &str, pivot: &str) -> Result<()> {
        self.move_section(name, Placement::Before(pivot))
    }

    pub fn move_section_after(&mut self, name: &str, pivot: &str) -> Result<()> {
        self.move_section(name, Placement::After(pivot))
    }

    pub fn move_section_to_start(&mut self, name: &str) -> Result<()> {
        self.move_section(name, Placement::Start)
    }

    pub fn move_section_to_end(&mut self, name: &str) -> Result<()> {
        self.move_section(name, Placement::End)
    }

    // ---------------------------------------------------------------------
    // Key mutations
    // ---------------------------------------------------------------------

    /// Add `key` with an empty value. An existing key is left untouched.
    pub fn set_key(&mut self, section: &str, key: &str) -> Result<()> {
        validate_key_name(key)?;
        let target = self.section_mut(section)?;
        if !target.contains_key(key) {
            target.insert(key, IniValue::empty());
        }
        Ok(())
    }

    /// Merge `pairs` into `section`. Existing keys are overwritten in place,
    /// new keys are appended in iteration order.
    pub fn set_keys<I, K, V>(&mut self, section: &str, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<IniValue>,
    {
        let pairs: Vec<(String, IniValue)> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        for (key, value) in &pairs {
            validate_key_name(key)?;
            validate_value(value)?;
        }
        let target = self.section_mut(section)?;
        for (key, value) in pairs {
            target.insert(key, value);
        }
        Ok(())
    }

    /// Overwrite the value of an existing key
    pub fn write_value(&mut self, section: &str, key: &str, content: impl Into<IniValue>) -> Result<()> {
        let content = content.into();
        validate_value(&content)?;
        let slot = self
            .section_mut(section)?
            .get_mut(key)
            .ok_or_else(|| IniError::key_not_found(section, key))?;
        *slot = content;
        Ok(())
    }

    /// Rename `old` to `new` within `section`, keeping its position
    pub fn rename_key(&mut self, section: &str, old: &str, new: &str) -> Result<()> {
        self.value(section, old)?;
        if old == new {
            return Ok(());
        }
        validate_key_name(new)?;
        if self.has_key(section, new) {
            return Err(IniError::invalid(format!(
                "key `{}` already exists in section [{}]",
                new, section
            )));
        }
        self.section_mut(section)?.rename_key(old, new);
        Ok(())
    }

    /// Empty the value of `key`; the key itself stays
    pub fn clear_value(&mut self, section: &str, key: &str) -> Result<()> {
        self.write_value(section, key, IniValue::empty())
    }

    pub fn remove_key(&mut self, section: &str, key: &str) -> Result<IniValue> {
        self.section_mut(section)?
            .remove(key)
            .ok_or_else(|| IniError::key_not_found(section, key))
    }

    /// Move `key` from `section` to the end of `new_section`
    pub fn move_key_to_section(&mut self, section: &str, key: &str, new_section: &str) -> Result<()> {
        self.value(section, key)?;
        if section == new_section {
            return self.move_key(section, key, Placement::End);
        }
        if self.section(new_section)?.contains_key(key) {
            return Err(IniError::invalid(format!(
                "key `{}` already exists in section [{}]",
                key, new_section
            )));
        }
        let value = self.remove_key(section, key)?;
        self.section_mut(new_section)?.insert(key, value);
        Ok(())
    }

    pub fn move_key(&mut self, section: &str, key: &str, placement: Placement<'_>) -> Result<()> {
        self.value(section, key)?;
        if let Placement::Before(pivot) | Placement::After(pivot) = placement {
            self.value(section, pivot)?;
            if pivot == key {
                return Err(IniError::invalid(format!(
                    "key `{}` cannot be moved relative to itself",
                    key
                )));
            }
        }
        self.section_mut(section)?.reposition(key, placement);
        Ok(())
    }

    pub fn move_key_before(&mut self, section: &str, key: &str, pivot: &str) -> Result<()> {
        self.move_key(section, key, Placement::Before(pivot))
    }

    pub fn move_key_after(&mut self, section: &str, key: &str, pivot: &str) -> Result<()> {
        self.move_key(section, key, Placement::After(pivot))
    }

    pub fn move_key_to_start(&mut self, section: &str, key: &str) -> Result<()> {
        self.move_key(section, key, Placement::Start)
    }

    pub fn move_key_to_end(&mut self, section: &str, key: &str) -> Result<()> {
        self.move_key(section, key, Placement::End)
    }

    // ---------------------------------------------------------------------
    // Crate internals
    // ---------------------------------------------------------------------

    fn section_mut(&mut self, name: &str) -> Result<&mut Section> {
        self.sections
            .get_mut(name)
            .ok_or_else(|| IniError::section_not_found(name))
    }

    /// Section used by the parser; created on first sight
    pub(crate) fn entry(&mut self, name: &str) -> &mut Section {
        self.sections.entry(name.to_string()).or_insert_with(Section::new)
    }

    /// Check names and values coming from an untyped source such as JSON
    pub(crate) fn validate(&self) -> Result<()> {
        for (name, section) in self.iter() {
            validate_section_name(name)?;
            for (key, value) in section.iter() {
                validate_key_name(key)?;
                validate_value(value)?;
            }
        }
        Ok(())
    }
}

impl<K> FromIterator<(K, Section)> for Document
where
    K: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Section)>>(iter: I) -> Self {
        let mut document = Document::new();
        for (name, section) in iter {
            let name = name.into();
            match document.sections.get_mut(&name) {
                Some(slot) => *slot = section,
                None => {
                    document.sections.insert(name, section);
                }
            }
        }
        document
    }
}

/// Section names end up inside `[...]` on their own line
pub(crate) fn validate_section_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(IniError::invalid("section name cannot be empty"));
    }
    if name.trim() != name || name.contains(&['[', ']', '\n', '\r'][..]) {
        return Err(IniError::invalid(format!("invalid section name {:?}", name)));
    }
    Ok(())
}

/// Key names end up on the left of ` = `
pub(crate) fn validate_key_name(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(IniError::invalid("key name cannot be empty"));
    }
    if key.trim() != key
        || key.starts_with(&[';', '#'][..])
        || key.contains(&['=', '[', ']', '\n', '\r'][..])
    {
        return Err(IniError::invalid(format!("invalid key name {:?}", key)));
    }
    Ok(())
}

/// Values are written inside double quotes, one line per scalar or list item
pub(crate) fn validate_value(value: &IniValue) -> Result<()> {
    match value {
        IniValue::Scalar(text) => validate_value_text(text),
        IniValue::List(items) if items.is_empty() => {
            Err(IniError::invalid("list value needs at least one item"))
        }
        IniValue::List(items) => items.iter().try_for_each(|item| validate_value_text(item)),
    }
}

fn validate_value_text(text: &str) -> Result<()> {
    if text.contains(&['"', '\n', '\r'][..]) {
        return Err(IniError::invalid(format!("invalid value {:?}", text)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::to_ini;
    use crate::parser::parse_ini;

    fn languages() -> Document {
        Document::from_iter([
            (
                "php",
                Section::from_iter([("ide", "phpstorm"), ("framework", "symfony"), ("orm", "doctrine")]),
            ),
            (
                "java",
                Section::from_iter([("ide", "eclipse"), ("framework", "jee"), ("orm", "hibernate")]),
            ),
            (
                "ruby",
                Section::from_iter([("ide", "rubymine"), ("framework", "ruby on rails"), ("orm", "ar")]),
            ),
        ])
    }

    fn names(doc: &Document) -> Vec<&str> {
        doc.section_names().collect()
    }

    #[test]
    fn test_lookup() {
        let doc = languages();
        assert!(doc.has_section("java"));
        assert!(!doc.has_section("js"));
        assert!(doc.has_key("ruby", "orm"));
        assert!(!doc.has_key("ruby", "lang"));
        assert!(!doc.has_key("js", "ide"));
        assert_eq!(doc.value("ruby", "ide").unwrap(), "rubymine");
        assert!(doc.value("ruby", "lang").unwrap_err().is_not_found());
        assert!(matches!(doc.section("js"), Err(IniError::SectionNotFound(_))));
        assert_eq!(doc.keys("php").unwrap(), ["ide", "framework", "orm"]);
    }

    #[test]
    fn test_indexes_match_positions() {
        let doc = languages();
        for (position, name) in names(&doc).into_iter().enumerate() {
            assert_eq!(doc.section_index(name), Some(position));
        }
        assert_eq!(doc.section_index("js"), None);
        assert_eq!(doc.key_index("java", "orm"), Some(2));
        assert_eq!(doc.key_index("java", "lang"), None);
        assert_eq!(doc.key_index("js", "ide"), None);
    }

    #[test]
    fn test_section_neighbours() {
        let doc = languages();
        assert!(doc.has_next_section("php"));
        assert!(!doc.has_next_section("ruby"));
        assert!(!doc.has_previous_section("php"));
        assert!(doc.has_previous_section("ruby"));
        assert!(!doc.has_next_section("js"));

        let (name, next) = doc.next_section("java").unwrap();
        assert_eq!(name, "ruby");
        assert_eq!(next.get("framework").unwrap(), "ruby on rails");
        assert_eq!(doc.previous_section("java").map(|(n, _)| n), Some("php"));
        assert!(doc.next_section("ruby").is_none());
    }

    #[test]
    fn test_key_neighbours() {
        let doc = languages();
        assert!(doc.has_next_key("php", "ide"));
        assert!(!doc.has_next_key("php", "orm"));
        assert!(doc.has_previous_key("php", "orm"));
        assert!(!doc.has_previous_key("php", "ide"));
        assert_eq!(doc.next_key("php", "ide").map(|(k, v)| (k, v.to_string())), Some(("framework", "symfony".to_string())));
        assert!(doc.previous_key("php", "ide").is_none());
        assert!(doc.next_key("js", "ide").is_none());
    }

    #[test]
    fn test_move_section_before() {
        let mut doc = languages();
        doc.move_section_before("ruby", "java").unwrap();
        assert_eq!(names(&doc), ["php", "ruby", "java"]);
        assert_eq!(doc.section_index("ruby"), Some(doc.section_index("java").unwrap() - 1));
    }

    #[test]
    fn test_move_section_after_start_end() {
        let mut doc = languages();
        doc.move_section_after("php", "java").unwrap();
        assert_eq!(names(&doc), ["java", "php", "ruby"]);
        doc.move_section_to_start("ruby").unwrap();
        assert_eq!(names(&doc), ["ruby", "java", "php"]);
        doc.move_section_to_end("ruby").unwrap();
        assert_eq!(names(&doc), ["java", "php", "ruby"]);
    }

    #[test]
    fn test_move_section_errors() {
        let mut doc = languages();
        assert!(matches!(doc.move_section_before("php", "php"), Err(IniError::InvalidArgument(_))));
        assert!(doc.move_section_before("js", "php").unwrap_err().is_not_found());
        assert!(doc.move_section_after("php", "js").unwrap_err().is_not_found());
        assert_eq!(names(&doc), ["php", "java", "ruby"]);
    }

    #[test]
    fn test_set_section_resets_in_place() {
        let mut doc = languages();
        doc.set_section("java").unwrap();
        assert_eq!(names(&doc), ["php", "java", "ruby"]);
        assert!(doc.section("java").unwrap().is_empty());

        doc.set_section_with("node", Section::from_iter([("ide", "webstorm")]))
            .unwrap();
        assert_eq!(names(&doc), ["php", "java", "ruby", "node"]);
        assert!(matches!(doc.set_section(""), Err(IniError::InvalidArgument(_))));
        assert!(matches!(doc.set_section("a]b"), Err(IniError::InvalidArgument(_))));
    }

    #[test]
    fn test_remove_section() {
        let mut doc = languages();
        let removed = doc.remove_section("java").unwrap();
        assert_eq!(removed.get("ide").unwrap(), "eclipse");
        assert_eq!(names(&doc), ["php", "ruby"]);
        assert!(doc.remove_section("java").unwrap_err().is_not_found());
    }

    #[test]
    fn test_rename_section_keeps_position() {
        let mut doc = languages();
        doc.rename_section("java", "kotlin").unwrap();
        assert_eq!(names(&doc), ["php", "kotlin", "ruby"]);
        assert_eq!(doc.value("kotlin", "ide").unwrap(), "eclipse");
        assert!(matches!(doc.rename_section("php", "ruby"), Err(IniError::InvalidArgument(_))));
        assert!(doc.rename_section("java", "scala").unwrap_err().is_not_found());
        doc.rename_section("php", "php").unwrap();
    }

    #[test]
    fn test_set_key_string_and_mapping() {
        let mut doc = Document::new();
        doc.set_section("bash").unwrap();
        doc.set_key("bash", "ide").unwrap();
        assert_eq!(doc.section("bash").unwrap(), &Section::from_iter([("ide", "")]));

        doc.write_value("bash", "ide", "vim").unwrap();
        doc.set_key("bash", "ide").unwrap();
        assert_eq!(doc.value("bash", "ide").unwrap(), "vim");

        doc.set_keys("bash", [("framework", "none"), ("ide", "terminal")]).unwrap();
        assert_eq!(doc.keys("bash").unwrap(), ["ide", "framework"]);
        assert_eq!(doc.value("bash", "ide").unwrap(), "terminal");
        assert!(doc.set_key("zsh", "ide").unwrap_err().is_not_found());
        assert!(matches!(doc.set_key("bash", "a=b"), Err(IniError::InvalidArgument(_))));
    }

    #[test]
    fn test_write_value_requires_existing_key() {
        let mut doc = languages();
        assert!(doc.write_value("php", "lang", "x").unwrap_err().is_not_found());
        assert!(doc.write_value("js", "ide", "x").unwrap_err().is_not_found());
        assert!(!doc.has_key("php", "lang"));
    }

    #[test]
    fn test_rename_key_keeps_position() {
        let mut doc = languages();
        doc.rename_key("php", "framework", "fw").unwrap();
        assert_eq!(doc.keys("php").unwrap(), ["ide", "fw", "orm"]);
        assert_eq!(doc.value("php", "fw").unwrap(), "symfony");
        assert!(matches!(doc.rename_key("php", "fw", "orm"), Err(IniError::InvalidArgument(_))));
        assert!(doc.rename_key("php", "framework", "x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_clear_and_remove_key() {
        let mut doc = languages();
        doc.clear_value("java", "orm").unwrap();
        assert_eq!(doc.value("java", "orm").unwrap(), "");
        assert!(doc.has_key("java", "orm"));

        doc.remove_key("java", "orm").unwrap();
        assert!(!doc.has_key("java", "orm"));
        assert!(doc.remove_key("java", "orm").unwrap_err().is_not_found());
    }

    #[test]
    fn test_move_key_to_section() {
        let mut doc = languages();
        doc.move_key_to_section("php", "ide", "java").unwrap_err();
        doc.remove_key("java", "ide").unwrap();
        doc.move_key_to_section("php", "ide", "java").unwrap();
        assert!(!doc.has_key("php", "ide"));
        assert_eq!(doc.keys("java").unwrap(), ["framework", "orm", "ide"]);
        assert_eq!(doc.value("java", "ide").unwrap(), "phpstorm");
        assert!(doc.move_key_to_section("php", "orm", "js").unwrap_err().is_not_found());
        assert!(doc.has_key("php", "orm"));

        doc.move_key_to_section("php", "framework", "php").unwrap();
        assert_eq!(doc.keys("php").unwrap(), ["orm", "framework"]);
    }

    #[test]
    fn test_move_key_before() {
        let mut doc = Document::new();
        doc.set_section_with(
            "js",
            Section::from_iter([("ide", "x"), ("framework", "y"), ("orm", "z")]),
        )
        .unwrap();
        doc.move_key_before("js", "framework", "ide").unwrap();
        assert_eq!(doc.keys("js").unwrap(), ["framework", "ide", "orm"]);
    }

    #[test]
    fn test_move_key_after_start_end() {
        let mut doc = languages();
        doc.move_key_after("ruby", "ide", "orm").unwrap();
        assert_eq!(doc.keys("ruby").unwrap(), ["framework", "orm", "ide"]);
        doc.move_key_to_start("ruby", "orm").unwrap();
        assert_eq!(doc.keys("ruby").unwrap(), ["orm", "framework", "ide"]);
        doc.move_key_to_end("ruby", "orm").unwrap();
        assert_eq!(doc.keys("ruby").unwrap(), ["framework", "ide", "orm"]);
        assert!(matches!(doc.move_key_after("ruby", "orm", "orm"), Err(IniError::InvalidArgument(_))));
        assert!(doc.move_key_before("ruby", "orm", "lang").unwrap_err().is_not_found());
    }

    #[test]
    fn test_rejects_values_the_writer_cannot_quote() {
        let mut doc = languages();
        for bad in ["say \"hi\"", "two\nlines", "cr\r"] {
            let err = doc.write_value("php", "ide", bad).unwrap_err();
            assert!(matches!(err, IniError::InvalidArgument(_)));
        }
        let err = doc
            .set_keys("php", [("paths", IniValue::from(vec!["ok", "not \"ok\""]))])
            .unwrap_err();
        assert!(matches!(err, IniError::InvalidArgument(_)));
        let err = doc
            .set_section_with("bash", Section::from_iter([("ide", "vi\nm")]))
            .unwrap_err();
        assert!(matches!(err, IniError::InvalidArgument(_)));

        assert!(!doc.has_section("bash"));
        assert!(!doc.has_key("php", "paths"));
        assert_eq!(doc.value("php", "ide").unwrap(), "phpstorm");
        assert_eq!(parse_ini(&to_ini(&doc)).unwrap(), doc);
    }

    #[test]
    fn test_rejects_empty_list() {
        let mut doc = languages();
        let empty = || IniValue::List(Vec::new());
        assert!(matches!(doc.write_value("php", "ide", empty()), Err(IniError::InvalidArgument(_))));
        assert!(matches!(doc.set_keys("php", [("paths", empty())]), Err(IniError::InvalidArgument(_))));
        assert!(matches!(
            doc.set_section_with("s", Section::from_iter([("paths", empty())])),
            Err(IniError::InvalidArgument(_))
        ));
        assert!(!doc.has_section("s"));
        assert!(doc.write_value("php", "ide", vec!["a", "b"]).is_ok());
    }
}
