use crate::config::{CliOverrides, Config};
use crate::error::{ExtractError, Result};
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use console::Term;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gbfr-extract")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract original game files listed by a mod into its staging tree")]
#[command(
    long_about = "gbfr-extract reads a mod's modded_filelist.txt, extracts every listed file \
                  from the game archive with GBFRDataTools, and moves it into \
                  <root>/original/<mod>/GBFR/data so it can be edited and repacked.\n\n\
                  The list file is expected at <root>/<mod folder>/<subdir>/modded_filelist.txt; \
                  the mod folder name (gbfr. becomes gbfrelink.) names the staging folder."
)]
#[command(after_help = "EXAMPLES:\n  \
    gbfr-extract D:/mods/gbfr.powerup.narmaya/data/modded_filelist.txt\n  \
    gbfr-extract modded_filelist.txt --config my-settings.toml --dry-run\n  \
    gbfr-extract modded_filelist.txt --tool C:/Tools/GBFRDataTools.exe --output-format json\n  \
    gbfr-extract --generate-config")]
pub struct Cli {
    /// Path to modded_filelist.txt (prompted for when omitted)
    pub list_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Path to the game's data.i index file
    #[arg(long, env = "GBFR_DATA_INDEX")]
    pub data_index: Option<PathBuf>,

    /// Path to the game's data folder
    #[arg(long, env = "GBFR_DATA_FOLDER")]
    pub data_folder: Option<PathBuf>,

    /// Path to GBFRDataTools
    #[arg(long, env = "GBFR_DATA_TOOLS")]
    pub tool: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "Show which files would be extracted without running the tool")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,

    /// Wait for Enter before exiting
    #[arg(long, help = "Wait for Enter before exiting (useful when launched by double-click)")]
    pub pause: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<&OutputFormat> for OutputMode {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_data_index(self.data_index.clone())
            .with_data_folder(self.data_folder.clone())
            .with_data_tools(self.tool.clone())
    }

    /// The list file from the command line, or read from the terminal.
    pub fn resolve_list_file(&self) -> Result<PathBuf> {
        let path = match self.list_file {
            Some(ref path) => path.clone(),
            None => prompt_for_list_file()?,
        };

        check_input_path(path)
    }

    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from(&self.output_format)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

fn prompt_for_list_file() -> Result<PathBuf> {
    let term = Term::stdout();
    term.write_str("Enter the full path to modded_filelist.txt: ")?;
    let line = term.read_line()?;
    Ok(PathBuf::from(clean_input_path(&line)))
}

/// Trims whitespace and the quotes Explorer adds when copying a path.
pub fn clean_input_path(raw: &str) -> String {
    raw.trim().trim_matches('"').trim().to_string()
}

pub fn check_input_path(path: PathBuf) -> Result<PathBuf> {
    if path.as_os_str().is_empty() || !path.is_file() {
        return Err(ExtractError::InputMissing {
            path: path.display().to_string(),
        });
    }
    Ok(path)
}
