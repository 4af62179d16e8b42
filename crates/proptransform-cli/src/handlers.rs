//! Command handlers for CLI subcommands
//!
//! Each subcommand lives in its own module; this module re-exports the
//! entry points `main` dispatches to.

mod apply;
mod completions;
mod config;
mod list;

pub use apply::handle_apply;
pub use completions::handle_completions;
pub use config::handle_config;
pub use list::handle_list;

use crate::error::{Error, Result};
use std::path::Path;

/// Fail with `FileNotFound` unless `path` exists
fn require_file(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}
