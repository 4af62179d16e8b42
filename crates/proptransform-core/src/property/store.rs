//! In-memory property store

use super::HostPropertyStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

/// A property store backed by a sorted map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyStore {
    properties: BTreeMap<String, String>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a property with set-if-absent semantics
    pub fn define(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.properties.contains_key(&key) {
            return false;
        }
        self.properties.insert(key, value.into());
        true
    }

    /// Iterate over all properties in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl HostPropertyStore for PropertyStore {
    fn set_if_absent(&mut self, key: &str, value: String) -> bool {
        let stored = self.define(key, value);
        if !stored {
            trace!(key = %key, "Override ignored for property");
        }
        stored
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for PropertyStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (key, value) in iter {
            store.define(key, value);
        }
        store
    }
}
