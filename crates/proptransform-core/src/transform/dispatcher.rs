//! Transform dispatcher
//!
//! The user-facing entry point: holds the `type` attribute plus the shared
//! request attributes, resolves the strategy from an explicit registry and
//! hands the request to the executor.
//!
//! Copyright (c) 2025 Proptransform Team
//! Licensed under the Apache-2.0 license

use crate::property::{HostPropertyStore, PropertySetSource};
use crate::{Error, Result};
use super::executor::TransformExecutor;
use super::registry::TransformRegistry;
use super::request::TransformRequest;
use super::types::TransformOutcome;
use std::sync::Arc;
use tracing::instrument;

/// Dispatches a transform by `type` identifier
#[derive(Debug, Clone)]
pub struct TransformDispatcher {
    registry: Arc<TransformRegistry>,
    type_id: Option<String>,
    attributes: TransformRequest,
}

impl TransformDispatcher {
    /// Create a dispatcher resolving strategies from `registry`
    pub fn new(registry: Arc<TransformRegistry>) -> Self {
        Self {
            registry,
            type_id: None,
            attributes: TransformRequest::new(),
        }
    }

    /// Set the strategy identifier
    pub fn type_id(mut self, type_id: impl Into<String>) -> Self {
        self.type_id = Some(type_id.into());
        self
    }

    /// Set the target property
    pub fn property(mut self, property: impl Into<String>) -> Self {
        self.attributes.property = Some(property.into());
        self
    }

    /// Set the value to transform
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.attributes.value = Some(value.into());
        self
    }

    /// Set the bulk key prefix
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.attributes.prefix = Some(prefix.into());
        self
    }

    /// Attach a property set
    pub fn property_set(mut self, set: Arc<dyn PropertySetSource>) -> Self {
        self.attributes.property_sets.push(set);
        self
    }

    /// Registry this dispatcher resolves against
    pub fn registry(&self) -> &Arc<TransformRegistry> {
        &self.registry
    }

    /// Resolve the strategy and run the transform against `store`
    #[instrument(skip(self, store), fields(type_id = ?self.type_id))]
    pub fn execute(&self, store: &mut dyn HostPropertyStore) -> Result<TransformOutcome> {
        let type_id = self
            .type_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(Error::MissingTypeAttribute)?;

        let strategy = self.registry.resolve(type_id).map_err(|err| match err {
            Error::UnknownTransformKind { id } => Error::UnknownTransformerType {
                type_id: id,
                known: self.registry.known_ids(),
            },
            other => other,
        })?;

        // Attributes are passed through untouched; the request decides the mode.
        let request = self.attributes.clone();
        TransformExecutor::new(strategy.as_ref()).execute(&request, store)
    }
}
