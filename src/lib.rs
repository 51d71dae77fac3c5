pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod filelist;
pub mod logging;
pub mod paths;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, GameConfig, ToolConfig};
pub use error::{ExtractError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    ArchiveExtractor, DataTools, DryRunPlan, PlannedAction, ProcessFileResult, ProcessResult,
    Relocator, RunReport,
};
pub use filelist::FileList;
pub use paths::PathConfig;
pub use ui::{OutputFormatter, OutputMode, ProgressAwareOutput, ProgressManager};

use std::path::{Path, PathBuf};
use std::time::Instant;

/// Main library interface: one instance drives one extraction run.
pub struct GbfrExtract {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl GbfrExtract {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(output_mode == OutputMode::Human && !quiet);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        Ok(Self::new(
            config,
            cli_args.output_mode(),
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    pub fn resolve_paths(&self, list_file: &Path) -> PathConfig {
        PathConfig::resolve(list_file, &self.config)
    }

    /// Extracts every file named in `list_file` with GBFRDataTools.
    pub fn run(&self, list_file: &Path) -> Result<RunReport> {
        let paths = self.resolve_paths(list_file);
        let extractor = DataTools::from_paths(&paths);
        self.run_with(list_file, &paths, &extractor)
    }

    /// Runs the pipeline with any extractor.
    ///
    /// Errors returned here abort the whole run. Failures of single entries
    /// are recorded in the report instead.
    pub fn run_with(
        &self,
        list_file: &Path,
        paths: &PathConfig,
        extractor: &dyn ArchiveExtractor,
    ) -> Result<RunReport> {
        let file_list = self.prepare(list_file, paths, true)?;

        let mut report = RunReport::new(paths.clone());
        let start_time = Instant::now();
        let file_progress = self
            .progress_manager
            .create_file_progress(file_list.len() as u64);
        let output = ProgressAwareOutput::new(&self.output_formatter, Some(&self.progress_manager));

        for (index, relative_path) in file_list.iter().enumerate() {
            ui::progress::update_file_progress(&file_progress, index, relative_path);

            let result = self.process_single_file(relative_path, paths, extractor, &output);
            report.record(relative_path, result);
        }

        ui::progress::finish_progress_with_summary(
            &file_progress,
            &format!("Processed {} files", file_list.len()),
            start_time.elapsed(),
        );
        self.progress_manager.clear();
        report.finish();

        tracing::info!(
            "Run finished: {} succeeded, {} failed, {} skipped",
            report.result.success_count,
            report.result.fail_count,
            report.result.skipped_count
        );

        Ok(report)
    }

    /// Reports what a run would do without touching the archive or the
    /// staging tree.
    pub fn dry_run(&self, list_file: &Path) -> Result<DryRunPlan> {
        let paths = self.resolve_paths(list_file);
        let file_list = self.prepare(list_file, &paths, false)?;

        let output = ProgressAwareOutput::new(&self.output_formatter, None);
        let mut plan = DryRunPlan::new(paths.clone());

        for relative_path in file_list.iter() {
            output.file_start(relative_path);

            let action = match plan_single_file(relative_path, &paths) {
                Ok(Some(destination)) => {
                    output.file_planned(relative_path, &destination);
                    PlannedAction::Extract { destination }
                }
                Ok(None) => {
                    output.file_skipped(relative_path);
                    PlannedAction::Skip
                }
                Err(e) => {
                    let reason = e.user_message();
                    output.file_failed(relative_path, &reason);
                    PlannedAction::Reject { reason }
                }
            };
            plan.push(relative_path, action);
        }

        Ok(plan)
    }

    /// Validation, staging folder and file list: everything that must hold
    /// before the first entry is touched.
    fn prepare(&self, list_file: &Path, paths: &PathConfig, create_target: bool) -> Result<FileList> {
        crate::paths::validate_paths(paths)?;
        self.output_formatter.print_path_info(paths);

        if let Some(warning) = crate::paths::layout_warning(list_file) {
            tracing::warn!("{}", warning);
            self.output_formatter.warning(&warning);
        }

        if create_target {
            ensure_directory_exists(&paths.target_sub_folder, &self.output_formatter)?;
        }

        let file_list = FileList::read(list_file)?;
        if file_list.is_empty() {
            return Err(ExtractError::EmptyFileList {
                path: list_file.display().to_string(),
            });
        }

        self.output_formatter
            .info(&format!("Found {} files to extract", file_list.len()));
        Ok(file_list)
    }

    /// Extracts and relocates one entry. Never fails: any error becomes
    /// `ProcessFileResult::Failed`.
    pub fn process_single_file(
        &self,
        relative_path: &str,
        paths: &PathConfig,
        extractor: &dyn ArchiveExtractor,
        output: &ProgressAwareOutput<'_>,
    ) -> ProcessFileResult {
        output.file_start(relative_path);

        match try_process_file(relative_path, paths, extractor) {
            Ok(Some(destination)) => {
                output.file_success(relative_path, &destination);
                ProcessFileResult::Success
            }
            Ok(None) => {
                output.file_skipped(relative_path);
                ProcessFileResult::Skipped
            }
            Err(e) => {
                tracing::warn!("Failed to process {}: {}", relative_path, e);
                let reason = e.user_message();
                output.file_failed(relative_path, &reason);
                ProcessFileResult::Failed { reason }
            }
        }
    }

    /// Print the final report for a run
    pub fn print_report(&self, report: &RunReport) {
        self.output_formatter.print_run_report(report);
    }

    pub fn print_plan(&self, plan: &DryRunPlan) {
        self.output_formatter.print_dry_run_plan(plan);
    }

    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn handle_error(&self, error: &ExtractError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// `Ok(None)` means the entry was skipped.
fn try_process_file(
    relative_path: &str,
    paths: &PathConfig,
    extractor: &dyn ArchiveExtractor,
) -> Result<Option<PathBuf>> {
    if plan_single_file(relative_path, paths)?.is_none() {
        return Ok(None);
    }

    extractor.extract(relative_path)?;
    let destination = Relocator::new(paths).relocate(relative_path)?;
    Ok(Some(destination))
}

/// Destination for an entry that needs extracting, or `None` when it is
/// already staged.
fn plan_single_file(relative_path: &str, paths: &PathConfig) -> Result<Option<PathBuf>> {
    filelist::validate_relative_path(relative_path)?;

    let target = paths.target_file_path(relative_path);
    if let Some(reason) = extractor::skip_reason(&target) {
        tracing::debug!("Skipping {}: {:?}", relative_path, reason);
        return Ok(None);
    }

    Ok(Some(target))
}

fn ensure_directory_exists(directory: &Path, formatter: &OutputFormatter) -> Result<()> {
    if !directory.is_dir() {
        std::fs::create_dir_all(directory)?;
        formatter.info(&format!("Created folder: {}", directory.display()));
    }
    Ok(())
}
