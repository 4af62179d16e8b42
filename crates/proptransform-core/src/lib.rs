//! proptransform core - declarative property value transformations
//!
//! This crate provides the transform dispatch framework for build tools:
//! named strategies (`identity`, `lower`, `upper` and anything registered
//! later) applied either to a single value or, with key renaming, to whole
//! property sets. Results are written back to the host's property store
//! without ever overwriting an existing value.
//!
//! # Main Components
//!
//! - **Error Handling**: One error enum using `thiserror`, with fixed messages
//! - **Transform Dispatch**: Registry, request validation, executor, dispatcher
//! - **Property Model**: Host store and property-set traits plus in-memory implementations
//! - **Locale**: Default-locale case conversion
//!
//! # Example
//!
//! ```
//! use proptransform_core::{PropertyStore, Result, TransformDispatcher, TransformRegistry};
//!
//! fn example() -> Result<()> {
//!     let mut store = PropertyStore::new();
//!     TransformDispatcher::new(TransformRegistry::shared())
//!         .type_id("upper")
//!         .property("out")
//!         .value("abc")
//!         .execute(&mut store)?;
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod error;
pub mod locale;
pub mod property;
pub mod transform;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use locale::Locale;
pub use property::{
    load_property_file, HostPropertyStore, PropertySelector, PropertySet, PropertySetSource,
    PropertyStore,
};
pub use transform::{
    renamed_key, BuiltinTransform, TransformDispatcher, TransformExecutor, TransformMode,
    TransformOutcome, TransformRegistry, TransformRequest, TransformStrategy,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
