//! Error types for the proptransform core library
//!
//! This module defines the error handling system for transform dispatch,
//! using thiserror for the error definitions and anyhow for boxed causes
//! coming out of strategy factories.
//!
//! Every message is fixed text so callers can assert on it directly.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for transform operations
#[derive(Error, Debug)]
pub enum Error {
    /// The dispatcher was executed without a `type` attribute
    #[error("Type not specified.")]
    MissingTypeAttribute,

    /// The dispatcher's `type` does not name a registered strategy
    #[error("Type \"{type_id}\" not supported. Please choose: {}", known.join(", "))]
    UnknownTransformerType {
        type_id: String,
        /// Sorted snapshot of the registered identifiers
        known: Vec<String>,
    },

    /// Registry lookup for an identifier that was never registered
    #[error("Unknown transform kind \"{id}\".")]
    UnknownTransformKind { id: String },

    /// A registered factory failed to produce a strategy instance
    #[error("Unable to instantiate transformer of type \"{type_id}\".")]
    TransformerInstantiationFailed {
        type_id: String,
        #[source]
        source: anyhow::Error,
    },

    /// An attribute was set that the selected mode forbids
    #[error("Invalid attribute combination. Attribute \"{attribute}\" must not be set.")]
    ConflictingAttribute { attribute: String },

    /// Bulk mode without a prefix
    #[error("You must set a prefix to transform multiple properties.")]
    MissingPrefix,

    /// Single mode without a target property
    #[error("You must set a property name as target for the transformation.")]
    MissingProperty,

    /// Single mode without a value (an empty value is allowed)
    #[error("You must set a value to transform.")]
    MissingValue,

    /// Property sets attached while in single mode
    #[error("Invalid attribute combination. Embedded propertyset does not match attributes set.")]
    ConflictingPropertySets,

    /// A strategy rejected its input
    #[error("Transformation \"{strategy}\" failed: {message}")]
    TransformFailed { strategy: String, message: String },

    /// A property file could not be parsed
    #[error("Invalid property file {}: {message}", path.display())]
    PropertyFile { path: PathBuf, message: String },

    /// A property-set selector could not be compiled
    #[error("Invalid property selector \"{pattern}\": {message}")]
    InvalidSelector { pattern: String, message: String },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a conflicting attribute error for the named attribute
    pub fn conflicting(attribute: impl Into<String>) -> Self {
        Error::ConflictingAttribute {
            attribute: attribute.into(),
        }
    }

    /// True for errors caused by the invocation's own attributes
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::MissingTypeAttribute
                | Error::UnknownTransformerType { .. }
                | Error::UnknownTransformKind { .. }
                | Error::ConflictingAttribute { .. }
                | Error::MissingPrefix
                | Error::MissingProperty
                | Error::MissingValue
                | Error::ConflictingPropertySets
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}
