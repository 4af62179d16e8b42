//! Transform dispatch system for property values
//!
//! This module provides the pluggable registry of named transformation
//! strategies, the single/bulk execution contract with its attribute
//! validation, and the prefix-based key renaming used in bulk mode.
//!
//! # Module Organization
//!
//! - [`types`] - Strategy trait, execution mode and outcome types
//! - [`built_in`] - The `identity`, `lower` and `upper` strategies
//! - [`registry`] - Identifier to strategy factory mapping
//! - [`request`] - Request attributes and the validation decision table
//! - [`executor`] - Single and bulk execution, key renaming
//! - [`dispatcher`] - Entry point selecting a strategy by `type`
//!
//! # Examples
//!
//! ## Single value
//!
//! ```
//! use proptransform_core::{PropertyStore, TransformDispatcher, TransformRegistry};
//! use proptransform_core::property::HostPropertyStore;
//!
//! let mut store = PropertyStore::new();
//! TransformDispatcher::new(TransformRegistry::shared())
//!     .type_id("identity")
//!     .property("out")
//!     .value("abc")
//!     .execute(&mut store)
//!     .unwrap();
//!
//! assert_eq!(store.get("out"), Some("abc"));
//! ```
//!
//! ## Property sets
//!
//! ```
//! use proptransform_core::{PropertySet, PropertyStore, TransformDispatcher, TransformRegistry};
//! use proptransform_core::property::HostPropertyStore;
//! use std::sync::Arc;
//!
//! let set: PropertySet = vec![("foo", "bar")].into_iter().collect();
//! let mut store = PropertyStore::new();
//! TransformDispatcher::new(TransformRegistry::shared())
//!     .type_id("identity")
//!     .prefix("pre")
//!     .property_set(Arc::new(set))
//!     .execute(&mut store)
//!     .unwrap();
//!
//! assert_eq!(store.get("pre.foo"), Some("bar"));
//! ```
//!
//! Copyright (c) 2025 Proptransform Team
//! Licensed under the Apache-2.0 license

pub mod types;

pub mod built_in;

pub mod registry;

pub mod request;

pub mod executor;

pub mod dispatcher;



pub use types::{PropertyWrite, TransformMode, TransformOutcome, TransformStrategy};
pub use built_in::{BuiltinTransform, CaseTransform, Identity};
pub use registry::{RegistryEntry, TransformFactory, TransformRegistry};
pub use request::{AttributeState, TransformRequest, ValidationRule, VALIDATION_RULES};
pub use executor::{renamed_key, TransformExecutor, PREFIX_SEPARATOR};
pub use dispatcher::TransformDispatcher;
