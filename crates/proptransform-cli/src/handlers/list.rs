//! List command handler

use crate::error::Result;
use crate::output::OutputWriter;
use proptransform_core::TransformRegistry;
use tracing::debug;

/// Print every registered transformation type, sorted
pub fn handle_list(registry: &TransformRegistry, output: &mut OutputWriter) -> Result<()> {
    let types = registry.known_ids();
    debug!(count = types.len(), "Listing transformation types");
    output.types(&types)
}
