use linked_hash_map::LinkedHashMap;
use serde::{Deserialize, Serialize};

use super::ordering::{self, Placement};
use super::value::IniValue;

/// An ordered group of key/value pairs under one `[header]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Section {
    entries: LinkedHashMap<String, IniValue>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key names in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IniValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&IniValue> {
        self.entries.get(key)
    }

    /// Position of `key` in declaration order
    pub fn key_index(&self, key: &str) -> Option<usize> {
        ordering::index_of(&self.entries, key)
    }

    pub fn has_next_key(&self, key: &str) -> bool {
        self.next_key(key).is_some()
    }

    pub fn has_previous_key(&self, key: &str) -> bool {
        self.previous_key(key).is_some()
    }

    pub fn next_key(&self, key: &str) -> Option<(&str, &IniValue)> {
        ordering::next_of(&self.entries, key)
    }

    pub fn previous_key(&self, key: &str) -> Option<(&str, &IniValue)> {
        ordering::previous_of(&self.entries, key)
    }

    /// Set `key` to `value`. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<IniValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.get_mut(&key) {
            Some(slot) => *slot = value,
            None => {
                self.entries.insert(key, value);
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<IniValue> {
        self.entries.remove(key)
    }

    /// Append `item` to the list stored under `key`. A scalar already stored
    /// there is replaced by a one-item list.
    pub(crate) fn push_list_item(&mut self, key: &str, item: String) {
        match self.entries.get_mut(key) {
            Some(IniValue::List(items)) => items.push(item),
            Some(slot) => *slot = IniValue::List(vec![item]),
            None => {
                self.entries.insert(key.to_string(), IniValue::List(vec![item]));
            }
        }
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut IniValue> {
        self.entries.get_mut(key)
    }

    pub(crate) fn reposition(&mut self, key: &str, placement: Placement<'_>) {
        ordering::reposition(&mut self.entries, key, placement);
    }

    pub(crate) fn rename_key(&mut self, old: &str, new: &str) {
        ordering::rename_in_place(&mut self.entries, old, new);
    }
}

impl<K, V> FromIterator<(K, V)> for Section
where
    K: Into<String>,
    V: Into<IniValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut section = Section::new();
        for (key, value) in iter {
            section.insert(key, value);
        }
        section
    }
}
