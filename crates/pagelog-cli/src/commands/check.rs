//! Check command implementation.
//!
//! Validates every configuration layer without reading events.

use crate::cli::CheckArgs;
use crate::error::Result;
use crate::{config, ui};

/// Execute the check command.
///
/// # Errors
///
/// Returns the first configuration error found.
pub fn execute(args: CheckArgs, quiet: bool) -> Result<()> {
    let config = config::load(&args.config)?;
    if !quiet {
        ui::print_config(&config);
    }
    Ok(())
}
