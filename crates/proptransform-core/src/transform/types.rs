//! Core types for the transform dispatch system
//!
//! This module defines the strategy trait every transformation implements,
//! the execution mode, and the outcome reported back to the host.
//!
//! Copyright (c) 2025 Proptransform Team
//! Licensed under the Apache-2.0 license

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stateless string-to-string transformation
///
/// Implementations must not keep state between calls; the registry hands out
/// a fresh instance per dispatch regardless.
pub trait TransformStrategy: Send + Sync + fmt::Debug {
    /// Identifier used in logs and error messages
    fn name(&self) -> &str;

    /// Transform a single value
    fn transform(&self, value: &str) -> Result<String>;
}

/// How an invocation applies its strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    /// Transform one value into one named property
    Single,
    /// Transform every entry of the attached property sets under a prefix
    Bulk,
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformMode::Single => write!(f, "single"),
            TransformMode::Bulk => write!(f, "bulk"),
        }
    }
}

/// One write requested from the host property store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyWrite {
    pub key: String,
    pub value: String,
    /// False when the key already had a value and the write was ignored
    pub applied: bool,
}

/// Result of one dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOutcome {
    /// Strategy identifier the dispatch resolved to
    pub strategy: String,
    pub mode: TransformMode,
    /// Every write in the order it was requested
    pub writes: Vec<PropertyWrite>,
}

impl TransformOutcome {
    /// Number of writes the store accepted
    pub fn applied_count(&self) -> usize {
        self.writes.iter().filter(|w| w.applied).count()
    }

    /// Number of writes ignored because the key was already set
    pub fn ignored_count(&self) -> usize {
        self.writes.len() - self.applied_count()
    }
}
