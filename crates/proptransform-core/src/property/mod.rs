//! Host-side property abstractions
//!
//! The transform core only talks to the host through two traits: a property
//! store with set-if-absent writes and a read-only source of key/value
//! pairs. The concrete types here are the reference host used by the CLI
//! and the tests.

pub mod file;
pub mod set;
pub mod store;

pub use file::{load_property_file, parse_properties, PropertyFileFormat};
pub use set::{PropertySelector, PropertySet};
pub use store::PropertyStore;

/// The host's property store
///
/// Writes never overwrite: once a key holds a value, later writes to it are
/// ignored.
pub trait HostPropertyStore {
    /// Store `value` under `key` unless `key` is already set
    ///
    /// Returns true if the value was stored.
    fn set_if_absent(&mut self, key: &str, value: String) -> bool;

    /// Read a property
    fn get(&self, key: &str) -> Option<&str>;
}

/// A read-only, externally owned set of key/value pairs
pub trait PropertySetSource: Send + Sync {
    /// Entries in the order the source yields them
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_>;
}
