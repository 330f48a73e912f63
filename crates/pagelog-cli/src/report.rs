//! Report sink: the JSON artifact consumed by later CI steps.

use crate::error::{Result, ResultExt};
use pagelog::Report;
use std::fs;
use std::path::Path;
use tracing::info;

/// Writes `report` as pretty JSON, creating parent directories as needed.
///
/// # Errors
///
/// Returns I/O or serialization failures.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_path(parent)?;
    }

    let json = report.to_json_pretty()?;
    fs::write(path, json).with_path(path)?;

    info!(path = %path.display(), messages = report.len(), "report written");
    Ok(())
}
