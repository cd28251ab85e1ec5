//! Template dictionaries.

use std::collections::BTreeMap;

use super::fragment::CodeFragment;

/// A value a template can interpolate, branch on or iterate.
#[derive(Debug, Clone, PartialEq)]
pub enum DictValue {
    Code(CodeFragment),
    Flag(bool),
    Dict(Dictionary),
    List(Vec<Dictionary>),
}

/// Variables for one template render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: BTreeMap<String, DictValue>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<DictValue>) -> &mut Self {
        self.entries.insert(key.to_string(), value.into());
        self
    }

    /// Chaining form of [`Dictionary::insert`].
    pub fn with(mut self, key: &str, value: impl Into<DictValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&DictValue> {
        self.entries.get(key)
    }

    pub fn code(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(DictValue::Code(code)) => Some(code.as_str()),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.entries.get(key) {
            Some(DictValue::Flag(flag)) => Some(*flag),
            _ => None,
        }
    }

    pub fn list(&self, key: &str) -> Option<&[Dictionary]> {
        match self.entries.get(key) {
            Some(DictValue::List(items)) => Some(items),
            _ => None,
        }
    }

    pub fn dict(&self, key: &str) -> Option<&Dictionary> {
        match self.entries.get(key) {
            Some(DictValue::Dict(dict)) => Some(dict),
            _ => None,
        }
    }

    /// Copies every entry of `other` into this dictionary.
    pub fn extend(&mut self, other: Dictionary) {
        self.entries.extend(other.entries);
    }
}

impl From<CodeFragment> for DictValue {
    fn from(code: CodeFragment) -> Self {
        DictValue::Code(code)
    }
}

impl From<bool> for DictValue {
    fn from(flag: bool) -> Self {
        DictValue::Flag(flag)
    }
}

impl From<Dictionary> for DictValue {
    fn from(dict: Dictionary) -> Self {
        DictValue::Dict(dict)
    }
}

impl From<Vec<Dictionary>> for DictValue {
    fn from(items: Vec<Dictionary>) -> Self {
        DictValue::List(items)
    }
}

/// Adds `first`/`last` markers to a sequence of dictionaries.
pub fn mark_ends(mut items: Vec<Dictionary>) -> Vec<Dictionary> {
    let count = items.len();
    for (i, item) in items.iter_mut().enumerate() {
        item.insert("first", i == 0);
        item.insert("last", i + 1 == count);
    }
    items
}
