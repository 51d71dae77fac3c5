use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Cannot find {what} at {path}")]
    PathInvalid { what: String, path: String },

    #[error("Input file does not exist: {path}")]
    InputMissing { path: String },

    #[error("File list is empty: {path}")]
    EmptyFileList { path: String },

    #[error("Unable to start process {tool}: {source}")]
    ToolLaunch {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Extraction failed: {message}")]
    ExtractionFailed { code: Option<i32>, message: String },

    #[error("Cannot find extracted file at {path}")]
    ExtractedFileMissing { path: String },

    #[error("Unsafe relative path: {path}")]
    UnsafeRelativePath { path: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ExtractError {
    fn user_message(&self) -> String {
        match self {
            ExtractError::Config { message } => {
                format!("Error loading configuration: {}", message)
            }
            ExtractError::PathInvalid { what, path } => {
                format!("Cannot find {} at {}", what, path)
            }
            ExtractError::InputMissing { path } => {
                if path.is_empty() {
                    "No input file was given".to_string()
                } else {
                    format!("File does not exist: {}", path)
                }
            }
            ExtractError::EmptyFileList { .. } => "File list is empty!".to_string(),
            ExtractError::ExtractedFileMissing { path } => {
                format!("Cannot find extracted file at {}", path)
            }
            ExtractError::UnsafeRelativePath { path } => {
                format!("Refusing to extract path outside the archive: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ExtractError::Config { .. } => Some(
                "Please ensure gbfr-extract.toml exists and is properly formatted, or pass --data-index, --data-folder and --tool. Run with --generate-config to create a sample.".to_string()
            ),
            ExtractError::PathInvalid { .. } => Some(
                "Check the paths in your configuration file and make sure the game and GBFRDataTools are installed there.".to_string()
            ),
            ExtractError::InputMissing { .. } => Some(
                "Pass the full path to modded_filelist.txt, laid out as <root>/<mod folder>/<subdir>/modded_filelist.txt, e.g. <project>/gbfr.my.mod/data/modded_filelist.txt".to_string()
            ),
            ExtractError::EmptyFileList { .. } => Some(
                "Add one relative asset path per line to the file list.".to_string()
            ),
            ExtractError::ToolLaunch { .. } => Some(
                "Make sure the extraction tool is executable.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ExtractError {
    fn from(error: toml::de::Error) -> Self {
        ExtractError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
