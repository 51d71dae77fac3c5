use crate::config::Config;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Segments inserted between the staging subfolder and every relative path.
pub const STAGING_PREFIX: [&str; 2] = ["GBFR", "data"];

const ORIGINAL_FOLDER: &str = "original";
const MOD_PREFIX: &str = "gbfr.";
const STAGING_MOD_PREFIX: &str = "gbfrelink.";

/// Every location a run touches, derived once from the list file path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathConfig {
    pub project_root: PathBuf,
    pub data_tools: PathBuf,
    pub data_index: PathBuf,
    pub data_folder: PathBuf,
    pub original_folder: PathBuf,
    pub target_sub_folder: PathBuf,
}

impl PathConfig {
    /// Resolves paths for a list file laid out as
    /// `<root>/<mod-folder>/<subdir>/modded_filelist.txt`.
    ///
    /// This is pure path arithmetic. Missing ancestors resolve to an empty
    /// path and are caught by validation later on.
    pub fn resolve(input_path: &Path, config: &Config) -> Self {
        let input_directory = input_path.parent().unwrap_or_else(|| Path::new(""));
        let mod_directory = input_directory.parent().unwrap_or_else(|| Path::new(""));
        let project_root = mod_directory
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .to_path_buf();

        let mod_folder_name = mod_directory
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let target_folder_name = staging_folder_name(&mod_folder_name);

        let original_folder = project_root.join(ORIGINAL_FOLDER);
        let target_sub_folder = original_folder.join(target_folder_name);

        Self {
            project_root,
            data_tools: config.tool.data_tools_path.clone(),
            data_index: config.game.data_index_path.clone(),
            data_folder: config.game.data_folder_path.clone(),
            original_folder,
            target_sub_folder,
        }
    }

    /// Where a relative path ends up in the staging tree.
    pub fn target_file_path(&self, relative_path: &str) -> PathBuf {
        let mut path = self.target_sub_folder.clone();
        for segment in STAGING_PREFIX {
            path.push(segment);
        }
        path.join(relative_path)
    }

    /// Where the extraction tool writes a relative path.
    pub fn extracted_file_path(&self, relative_path: &str) -> PathBuf {
        self.data_folder.join(relative_path)
    }

    pub fn display_summary(&self) -> String {
        format!(
            "Project Root: {}\nOriginal Folder: {}\nTarget Subfolder: {}",
            self.project_root.display(),
            self.original_folder.display(),
            self.target_sub_folder.display()
        )
    }
}

/// Expected placement of the list file relative to the mod folder.
pub const EXPECTED_LAYOUT: &str = "<root>/<mod folder>/<subdir>/modded_filelist.txt";

/// Detects a list file placed directly inside a `gbfr.` mod folder. The mod
/// name is taken two levels up, so such a list would be staged under its
/// grandparent's name instead.
pub fn layout_warning(input_path: &Path) -> Option<String> {
    let input_directory = input_path.parent()?;
    let list_folder = input_directory.file_name()?.to_string_lossy();
    let mod_folder = input_directory
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    if !list_folder.starts_with(MOD_PREFIX) || mod_folder.starts_with(MOD_PREFIX) {
        return None;
    }

    Some(format!(
        "List file sits directly in mod folder '{}'; expected {}. Files will be staged under '{}'",
        list_folder,
        EXPECTED_LAYOUT,
        staging_folder_name(&mod_folder)
    ))
}

/// Maps a mod folder name to its staging name (`gbfr.` becomes `gbfrelink.`).
pub fn staging_folder_name(mod_folder_name: &str) -> String {
    mod_folder_name.replace(MOD_PREFIX, STAGING_MOD_PREFIX)
}
