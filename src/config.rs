use crate::error::{ExtractError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub tool: ToolConfig,
}

/// Locations of the packed game archive.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GameConfig {
    /// Path to the game's data.i index file
    #[serde(default)]
    pub data_index_path: PathBuf,
    /// Path to the game's data folder, where the tool writes extracted files
    #[serde(default)]
    pub data_folder_path: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolConfig {
    /// Path to GBFRDataTools
    #[serde(default)]
    pub data_tools_path: PathBuf,
}

pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["gbfr-extract.toml", ".gbfr-extract.toml"];

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ExtractError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ExtractError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ExtractError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                for default_path in &DEFAULT_CONFIG_PATHS {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                // Values may still come from CLI overrides
                tracing::debug!("No configuration file found, starting from empty settings");
                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref data_index) = cli_args.data_index {
            self.game.data_index_path = data_index.clone();
        }

        if let Some(ref data_folder) = cli_args.data_folder {
            self.game.data_folder_path = data_folder.clone();
        }

        if let Some(ref tool) = cli_args.data_tools {
            self.tool.data_tools_path = tool.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ExtractError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| ExtractError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    /// Presence checks only. Existence on disk is checked later, per run.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("game.data_index_path", &self.game.data_index_path),
            ("game.data_folder_path", &self.game.data_folder_path),
            ("tool.data_tools_path", &self.tool.data_tools_path),
        ];

        for (key, value) in required {
            if value.as_os_str().is_empty() {
                return Err(ExtractError::Config {
                    message: format!("Missing required setting: {}", key),
                });
            }
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self {
            game: GameConfig {
                data_index_path: PathBuf::from(
                    "C:/Program Files (x86)/Steam/steamapps/common/Granblue Fantasy Relink/data.i",
                ),
                data_folder_path: PathBuf::from(
                    "C:/Program Files (x86)/Steam/steamapps/common/Granblue Fantasy Relink/data",
                ),
            },
            tool: ToolConfig {
                data_tools_path: PathBuf::from("C:/Tools/GBFRDataTools/GBFRDataTools.exe"),
            },
        };
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub data_index: Option<PathBuf>,
    pub data_folder: Option<PathBuf>,
    pub data_tools: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_index(mut self, data_index: Option<PathBuf>) -> Self {
        self.data_index = data_index;
        self
    }

    pub fn with_data_folder(mut self, data_folder: Option<PathBuf>) -> Self {
        self.data_folder = data_folder;
        self
    }

    pub fn with_data_tools(mut self, data_tools: Option<PathBuf>) -> Self {
        self.data_tools = data_tools;
        self
    }
}
