//! Transform registry
//!
//! Maps `type` identifiers to strategy factories. Built-ins are a closed
//! enum; anything else is an open factory slot registered by the host.
//! The registry is shared behind an `Arc` and guards its map with a
//! `RwLock`, so registration and lookup may race from parallel tasks.
//!
//! Copyright (c) 2025 Proptransform Team
//! Licensed under the Apache-2.0 license

use crate::{Error, Result};
use super::built_in::BuiltinTransform;
use super::types::TransformStrategy;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Factory producing a fresh strategy per dispatch
pub type TransformFactory =
    Arc<dyn Fn() -> anyhow::Result<Box<dyn TransformStrategy>> + Send + Sync>;

/// What an identifier is bound to
#[derive(Clone)]
pub enum RegistryEntry {
    Builtin(BuiltinTransform),
    Factory(TransformFactory),
}

impl RegistryEntry {
    fn instantiate(&self) -> anyhow::Result<Box<dyn TransformStrategy>> {
        match self {
            RegistryEntry::Builtin(kind) => Ok(kind.create()),
            RegistryEntry::Factory(factory) => factory(),
        }
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryEntry::Builtin(kind) => f.debug_tuple("Builtin").field(kind).finish(),
            RegistryEntry::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// Registry of transform strategies keyed by case-sensitive identifier
#[derive(Debug)]
pub struct TransformRegistry {
    entries: RwLock<HashMap<String, RegistryEntry>>,
}

impl TransformRegistry {
    /// Create a registry with no entries at all
    pub fn empty() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry holding the three built-ins
    pub fn with_builtins() -> Self {
        let registry = Self::empty();
        for kind in BuiltinTransform::ALL {
            registry.register_builtin(kind.id(), kind);
        }
        registry
    }

    /// Create a shareable registry holding the built-ins
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::with_builtins())
    }

    // A writer that panicked mid-insert cannot leave a half-written entry
    // behind, so a poisoned lock still guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, RegistryEntry>> {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, RegistryEntry>> {
        self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn insert(&self, id: String, entry: RegistryEntry) {
        debug!(id = %id, entry = ?entry, "Registering transformer");
        if let Some(previous) = self.write().insert(id.clone(), entry) {
            debug!(id = %id, previous = ?previous, "Replaced existing transformer");
        }
    }

    /// Bind `id` to a factory; last write wins
    pub fn register<F>(&self, id: impl Into<String>, factory: F)
    where
        F: Fn() -> anyhow::Result<Box<dyn TransformStrategy>> + Send + Sync + 'static,
    {
        self.insert(id.into(), RegistryEntry::Factory(Arc::new(factory)));
    }

    /// Bind `id` to a built-in kind, e.g. to alias `caps` to `upper`
    pub fn register_builtin(&self, id: impl Into<String>, kind: BuiltinTransform) {
        self.insert(id.into(), RegistryEntry::Builtin(kind));
    }

    /// Remove a binding, returning whether one existed
    pub fn unregister(&self, id: &str) -> bool {
        self.write().remove(id).is_some()
    }

    /// Check whether `id` is registered
    pub fn contains(&self, id: &str) -> bool {
        self.read().contains_key(id)
    }

    /// Produce a fresh strategy for `id`
    pub fn resolve(&self, id: &str) -> Result<Box<dyn TransformStrategy>> {
        // Clone the entry out so the factory runs without holding the lock.
        let entry = self
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::UnknownTransformKind { id: id.to_string() })?;

        debug!(id = %id, "Resolving transformer");
        entry
            .instantiate()
            .map_err(|source| Error::TransformerInstantiationFailed {
                type_id: id.to_string(),
                source,
            })
    }

    /// Sorted snapshot of the registered identifiers
    pub fn known_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of registered identifiers
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::built_in::Identity;
    use std::thread;

    #[test]
    fn test_builtins_registered() {
        let registry = TransformRegistry::with_builtins();
        assert_eq!(registry.known_ids(), vec!["identity", "lower", "upper"]);
        assert_eq!(registry.len(), 3);
        assert!(TransformRegistry::empty().is_empty());
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = TransformRegistry::with_builtins();
        let err = registry.resolve("Upper").unwrap_err();
        assert!(matches!(err, Error::UnknownTransformKind { ref id } if id == "Upper"));
    }

    #[test]
    fn test_register_last_write_wins() {
        let registry = TransformRegistry::with_builtins();
        registry.register_builtin("upper", BuiltinTransform::Identity);
        let strategy = registry.resolve("upper").unwrap();
        assert_eq!(strategy.name(), "identity");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_factory_failure_is_wrapped() {
        let registry = TransformRegistry::with_builtins();
        registry.register("broken", || Err(anyhow::anyhow!("no access")));
        let err = registry.resolve("broken").unwrap_err();
        assert_eq!(err.to_string(), "Unable to instantiate transformer of type \"broken\".");
    }

    #[test]
    fn test_unregister() {
        let registry = TransformRegistry::with_builtins();
        assert!(registry.unregister("lower"));
        assert!(!registry.unregister("lower"));
        assert!(!registry.contains("lower"));
    }

    #[test]
    fn test_concurrent_register_and_resolve() {
        let registry = TransformRegistry::shared();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry.register(format!("custom-{}", i), || Ok(Box::new(Identity)));
                    for id in registry.known_ids() {
                        registry.resolve(&id).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.len(), 11);
    }
}
