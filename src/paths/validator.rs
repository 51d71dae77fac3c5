use crate::error::{ExtractError, Result};
use crate::paths::PathConfig;
use std::path::Path;

/// Checks the tool, the archive index and the asset folder, in that order.
/// Stops at the first missing location.
pub fn validate_paths(paths: &PathConfig) -> Result<()> {
    require_file(&paths.data_tools, "GBFRDataTools")?;
    require_file(&paths.data_index, "data.i")?;

    if !paths.data_folder.is_dir() {
        return Err(path_invalid("data folder", &paths.data_folder));
    }

    Ok(())
}

fn require_file(path: &Path, what: &str) -> Result<()> {
    if !path.is_file() {
        return Err(path_invalid(what, path));
    }
    Ok(())
}

fn path_invalid(what: &str, path: &Path) -> ExtractError {
    tracing::warn!("Missing {}: {}", what, path.display());
    ExtractError::PathInvalid {
        what: what.to_string(),
        path: path.display().to_string(),
    }
}
