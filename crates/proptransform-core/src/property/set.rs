//! Property sets
//!
//! A [`PropertySet`] is an ordered list of unique keys with their values.
//! Sets are usually built from a property file or selected out of a
//! [`PropertyStore`] by name, prefix or regular expression.

use super::{PropertySetSource, PropertyStore};
use crate::{Error, Result};
use regex::Regex;
use std::collections::HashMap;

/// Chooses properties out of a store
#[derive(Debug, Clone)]
pub enum PropertySelector {
    /// Exactly this key
    Name(String),
    /// Every key starting with this prefix
    Prefix(String),
    /// Every key matching this expression
    Regex(Regex),
}

impl PropertySelector {
    pub fn name(name: impl Into<String>) -> Self {
        PropertySelector::Name(name.into())
    }

    pub fn prefix(prefix: impl Into<String>) -> Self {
        PropertySelector::Prefix(prefix.into())
    }

    /// Compile a regex selector
    pub fn regex(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(PropertySelector::Regex)
            .map_err(|e| Error::InvalidSelector {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    pub fn matches(&self, key: &str) -> bool {
        match self {
            PropertySelector::Name(name) => key == name,
            PropertySelector::Prefix(prefix) => key.starts_with(prefix.as_str()),
            PropertySelector::Regex(regex) => regex.is_match(key),
        }
    }
}

/// An ordered set of properties
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    entries: Vec<(String, String)>,
    /// Position of each key in `entries`
    index: HashMap<String, usize>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select every property of `store` matched by any selector, in store order
    pub fn select(store: &PropertyStore, selectors: &[PropertySelector]) -> Self {
        store
            .iter()
            .filter(|(key, _)| selectors.iter().any(|s| s.matches(key)))
            .collect()
    }

    /// Add an entry; an existing key keeps its position and takes the new value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PropertySetSource for PropertySet {
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
        Box::new(self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

impl<K, V> FromIterator<(K, V)> for PropertySet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}
