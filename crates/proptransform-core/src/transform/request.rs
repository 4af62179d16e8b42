//! Transform requests and attribute validation
//!
//! A request carries the shared attributes of one invocation. The mode is
//! never stored: it is inferred from whether `property` was given. All
//! attribute combination rules live in [`VALIDATION_RULES`], checked in
//! order, first failure wins.
//!
//! Copyright (c) 2025 Proptransform Team
//! Licensed under the Apache-2.0 license

use crate::property::PropertySetSource;
use crate::{Error, Result};
use super::types::TransformMode;
use std::fmt;
use std::sync::Arc;

/// Configuration for one transform invocation
#[derive(Clone, Default)]
pub struct TransformRequest {
    /// Target key in single mode
    pub property: Option<String>,
    /// Input value in single mode; `Some("")` is a legal value
    pub value: Option<String>,
    /// Key prefix in bulk mode
    pub prefix: Option<String>,
    /// Sources to drain in bulk mode, in declaration order
    pub property_sets: Vec<Arc<dyn PropertySetSource>>,
}

impl TransformRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target property
    pub fn property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// Set the value to transform
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the bulk key prefix
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Attach a property set
    pub fn property_set(mut self, set: Arc<dyn PropertySetSource>) -> Self {
        self.property_sets.push(set);
        self
    }

    /// Bulk if `property` is absent or empty, single otherwise
    pub fn mode(&self) -> TransformMode {
        if is_blank(&self.property) {
            TransformMode::Bulk
        } else {
            TransformMode::Single
        }
    }

    /// Validate against the inferred mode
    pub fn validate(&self) -> Result<TransformMode> {
        let mode = self.mode();
        self.validate_for(mode)?;
        Ok(mode)
    }

    /// Validate against an explicitly chosen mode
    pub fn validate_for(&self, mode: TransformMode) -> Result<()> {
        let attributes = AttributeState::of(self);
        match VALIDATION_RULES
            .iter()
            .find(|rule| rule.mode == mode && (rule.violated)(&attributes))
        {
            Some(rule) => Err((rule.error)()),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for TransformRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformRequest")
            .field("property", &self.property)
            .field("value", &self.value)
            .field("prefix", &self.prefix)
            .field("property_sets", &self.property_sets.len())
            .finish()
    }
}

fn is_blank(attribute: &Option<String>) -> bool {
    attribute.as_deref().map_or(true, str::is_empty)
}

/// Which attributes an invocation supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeState {
    pub property: bool,
    /// `value` given at all, even as the empty string
    pub value_present: bool,
    /// `value` given and non-empty
    pub value_set: bool,
    pub prefix: bool,
    pub property_sets: bool,
}

impl AttributeState {
    pub fn of(request: &TransformRequest) -> Self {
        Self {
            property: !is_blank(&request.property),
            value_present: request.value.is_some(),
            value_set: !is_blank(&request.value),
            prefix: !is_blank(&request.prefix),
            property_sets: !request.property_sets.is_empty(),
        }
    }
}

/// One row of the attribute decision table
pub struct ValidationRule {
    pub mode: TransformMode,
    pub violated: fn(&AttributeState) -> bool,
    pub error: fn() -> Error,
}

/// Attribute combination rules per mode, in reporting order
pub const VALIDATION_RULES: &[ValidationRule] = &[
    ValidationRule {
        mode: TransformMode::Bulk,
        violated: |a| a.property,
        error: || Error::conflicting("property"),
    },
    ValidationRule {
        mode: TransformMode::Bulk,
        violated: |a| a.value_set,
        error: || Error::conflicting("value"),
    },
    ValidationRule {
        mode: TransformMode::Bulk,
        violated: |a| !a.prefix,
        error: || Error::MissingPrefix,
    },
    ValidationRule {
        mode: TransformMode::Single,
        violated: |a| a.prefix,
        error: || Error::conflicting("prefix"),
    },
    ValidationRule {
        mode: TransformMode::Single,
        violated: |a| !a.property,
        error: || Error::MissingProperty,
    },
    ValidationRule {
        mode: TransformMode::Single,
        violated: |a| !a.value_present,
        error: || Error::MissingValue,
    },
    ValidationRule {
        mode: TransformMode::Single,
        violated: |a| a.property_sets,
        error: || Error::ConflictingPropertySets,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertySet;

    fn empty_set() -> Arc<dyn PropertySetSource> {
        Arc::new(PropertySet::new())
    }

    #[test]
    fn test_mode_inference() {
        assert_eq!(TransformRequest::new().mode(), TransformMode::Bulk);
        assert_eq!(TransformRequest::new().property("").mode(), TransformMode::Bulk);
        assert_eq!(TransformRequest::new().property("out").mode(), TransformMode::Single);
    }

    #[test]
    fn test_single_valid() {
        let request = TransformRequest::new().property("out").value("abc");
        assert_eq!(request.validate().unwrap(), TransformMode::Single);
    }

    #[test]
    fn test_single_accepts_empty_value() {
        let request = TransformRequest::new().property("out").value("");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_single_rejects_prefix_first() {
        let request = TransformRequest::new().property("abc").value("abc").prefix("abc");
        assert_eq!(
            request.validate().unwrap_err().to_string(),
            "Invalid attribute combination. Attribute \"prefix\" must not be set."
        );
    }

    #[test]
    fn test_single_missing_value() {
        let err = TransformRequest::new().property("abc").validate().unwrap_err();
        assert!(matches!(err, Error::MissingValue));
    }

    #[test]
    fn test_single_rejects_property_sets() {
        let request = TransformRequest::new()
            .property("out")
            .value("abc")
            .property_set(empty_set());
        assert!(matches!(request.validate().unwrap_err(), Error::ConflictingPropertySets));
    }

    #[test]
    fn test_single_forced_without_property() {
        let err = TransformRequest::new()
            .validate_for(TransformMode::Single)
            .unwrap_err();
        assert!(matches!(err, Error::MissingProperty));
    }

    #[test]
    fn test_bulk_valid_without_sets() {
        let request = TransformRequest::new().prefix("pre");
        assert_eq!(request.validate().unwrap(), TransformMode::Bulk);
    }

    #[test]
    fn test_bulk_missing_prefix() {
        let err = TransformRequest::new().validate().unwrap_err();
        assert_eq!(err.to_string(), "You must set a prefix to transform multiple properties.");
    }

    #[test]
    fn test_bulk_rejects_value() {
        let err = TransformRequest::new().prefix("pre").value("abc").validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid attribute combination. Attribute \"value\" must not be set."
        );
    }

    #[test]
    fn test_bulk_allows_empty_value() {
        assert!(TransformRequest::new().prefix("pre").value("").validate().is_ok());
    }

    #[test]
    fn test_bulk_forced_rejects_property() {
        let err = TransformRequest::new()
            .property("abc")
            .validate_for(TransformMode::Bulk)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid attribute combination. Attribute \"property\" must not be set."
        );
    }

    #[test]
    fn test_every_mode_has_rules() {
        for mode in [TransformMode::Single, TransformMode::Bulk] {
            assert!(VALIDATION_RULES.iter().any(|rule| rule.mode == mode));
        }
    }
}
