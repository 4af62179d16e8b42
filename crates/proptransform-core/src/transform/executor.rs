//! Transform execution
//!
//! Runs a validated [`TransformRequest`] through one strategy and writes the
//! results to the host store with set-if-absent semantics. Every value is
//! transformed before the first write, so a failed invocation leaves the
//! store untouched.
//!
//! Copyright (c) 2025 Proptransform Team
//! Licensed under the Apache-2.0 license

use crate::property::HostPropertyStore;
use crate::Result;
use super::request::TransformRequest;
use super::types::{PropertyWrite, TransformMode, TransformOutcome, TransformStrategy};
use tracing::debug;

/// Separator inserted between the bulk prefix and each key
pub const PREFIX_SEPARATOR: char = '.';

/// Build the output key for a bulk entry
///
/// `renamed_key("pre", "foo")` and `renamed_key("pre.", "foo")` both give
/// `"pre.foo"`. Nothing else about the prefix or key is normalized.
pub fn renamed_key(prefix: &str, key: &str) -> String {
    let mut renamed = String::with_capacity(prefix.len() + key.len() + 1);
    renamed.push_str(prefix);
    if !prefix.ends_with(PREFIX_SEPARATOR) {
        renamed.push(PREFIX_SEPARATOR);
    }
    renamed.push_str(key);
    renamed
}

/// Applies one strategy to one request
pub struct TransformExecutor<'a> {
    strategy: &'a dyn TransformStrategy,
}

impl<'a> TransformExecutor<'a> {
    pub fn new(strategy: &'a dyn TransformStrategy) -> Self {
        Self { strategy }
    }

    /// Validate and run `request` in its inferred mode
    pub fn execute(
        &self,
        request: &TransformRequest,
        store: &mut dyn HostPropertyStore,
    ) -> Result<TransformOutcome> {
        self.execute_with_mode(request.mode(), request, store)
    }

    /// Validate and run `request` in a forced mode
    pub fn execute_with_mode(
        &self,
        mode: TransformMode,
        request: &TransformRequest,
        store: &mut dyn HostPropertyStore,
    ) -> Result<TransformOutcome> {
        match mode {
            TransformMode::Single => debug!("Mode set to single transformation."),
            TransformMode::Bulk => debug!("Mode set to multiple transformation."),
        }
        request.validate_for(mode)?;

        let pending = match mode {
            TransformMode::Single => self.transform_single(request)?,
            TransformMode::Bulk => self.transform_bulk(request)?,
        };

        let writes = pending
            .into_iter()
            .map(|(key, value)| {
                let applied = store.set_if_absent(&key, value.clone());
                if !applied {
                    debug!(key = %key, "Property already set, keeping existing value");
                }
                PropertyWrite { key, value, applied }
            })
            .collect();

        Ok(TransformOutcome {
            strategy: self.strategy.name().to_string(),
            mode,
            writes,
        })
    }

    fn transform_single(&self, request: &TransformRequest) -> Result<Vec<(String, String)>> {
        // Validation guarantees both attributes are present in single mode.
        let property = request.property.clone().unwrap_or_default();
        let value = self.strategy.transform(request.value.as_deref().unwrap_or_default())?;
        Ok(vec![(property, value)])
    }

    fn transform_bulk(&self, request: &TransformRequest) -> Result<Vec<(String, String)>> {
        let prefix = request.prefix.as_deref().unwrap_or_default();
        let mut pending = Vec::new();
        for (index, set) in request.property_sets.iter().enumerate() {
            let before = pending.len();
            for (key, value) in set.entries() {
                pending.push((renamed_key(prefix, key), self.strategy.transform(value)?));
            }
            debug!(set = index, entries = pending.len() - before, "Transformed property set");
        }
        Ok(pending)
    }
}
