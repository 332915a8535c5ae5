use std::fmt;

use serde::{Deserialize, Serialize};

/// Value stored under a key
///
/// Most keys hold a plain string. A key written as `key[] = ...` holds an
/// ordered list of strings; lists never nest further.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IniValue {
    Scalar(String),
    List(Vec<String>),
}

impl Default for IniValue {
    fn default() -> Self {
        IniValue::Scalar(String::new())
    }
}

impl IniValue {
    /// The empty scalar, used for freshly added keys
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            IniValue::Scalar(s) => Some(s),
            IniValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            IniValue::Scalar(_) => None,
            IniValue::List(items) => Some(items),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, IniValue::List(_))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            IniValue::Scalar(s) => s.is_empty(),
            IniValue::List(items) => items.is_empty(),
        }
    }
}

impl fmt::Display for IniValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IniValue::Scalar(s) => f.write_str(s),
            IniValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<String> for IniValue {
    fn from(value: String) -> Self {
        IniValue::Scalar(value)
    }
}

impl From<&str> for IniValue {
    fn from(value: &str) -> Self {
        IniValue::Scalar(value.to_string())
    }
}

impl From<Vec<String>> for IniValue {
    fn from(value: Vec<String>) -> Self {
        IniValue::List(value)
    }
}

impl From<Vec<&str>> for IniValue {
    fn from(value: Vec<&str>) -> Self {
        IniValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl PartialEq<str> for IniValue {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for IniValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}
