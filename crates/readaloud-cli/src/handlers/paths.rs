//! Paths command handler.
//!
//! Displays all resolved paths for diagnostics and debugging.

use readaloud_core::ResolvedPaths;

use crate::error::CliError;

/// Resolve and display all paths used by readaloud in `key = value` format.
pub fn execute() -> Result<(), CliError> {
    let paths = ResolvedPaths::resolve().map_err(readaloud_core::CoreError::from)?;
    println!("{paths}");
    Ok(())
}
