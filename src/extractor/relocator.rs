use crate::error::{ExtractError, Result};
use crate::paths::PathConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Moves freshly extracted files from the game's data folder into the
/// staging tree under `GBFR/data`.
pub struct Relocator<'a> {
    paths: &'a PathConfig,
}

impl<'a> Relocator<'a> {
    pub fn new(paths: &'a PathConfig) -> Self {
        Self { paths }
    }

    /// Returns the destination the file was moved to.
    pub fn relocate(&self, relative_path: &str) -> Result<PathBuf> {
        let source = self.paths.extracted_file_path(relative_path);
        if !source.is_file() {
            tracing::warn!("Cannot find extracted file at {}", source.display());
            return Err(ExtractError::ExtractedFileMissing {
                path: source.display().to_string(),
            });
        }

        let destination = self.paths.target_file_path(relative_path);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        move_file(&source, &destination)?;
        tracing::debug!("Moved {} -> {}", source.display(), destination.display());

        Ok(destination)
    }
}

/// Moves a file, replacing anything at `to`. Falls back to copy and delete
/// when a plain rename is not possible, e.g. across drives.
pub fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::warn!(
                "fs::rename failed (cross-device?): {}. Attempting copy and delete...",
                e
            );

            if !from.is_file() {
                return Err(e);
            }

            fs::copy(from, to)?;
            fs::remove_file(from)
        }
    }
}
