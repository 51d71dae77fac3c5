use crate::error::{ExtractError, UserFriendlyError};
use crate::extractor::{DryRunPlan, ProcessFileResult, ProcessResult, RunReport};
use crate::paths::PathConfig;
use console::{style, Emoji, Term};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static PACKAGE: Emoji = Emoji("📦 ", "> ");
static SPARKLES: Emoji = Emoji("✨ ", "* ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    // Core messaging methods
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &ExtractError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    pub fn print_header(&self, title: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}{}", SPARKLES, style(title).bold().cyan());
                } else {
                    println!("=== {} ===", title);
                }
                println!();
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "header",
                    "title": title
                }));
            }
            OutputMode::Plain => {
                println!("=== {} ===", title);
            }
        }
    }

    pub fn print_path_info(&self, paths: &PathConfig) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "paths",
                    "paths": paths
                }));
            }
            _ => {
                println!("{}", paths.display_summary());
                println!();
            }
        }
    }

    // Per-file transcript
    pub fn file_start(&self, relative_path: &str) {
        if !self.should_show_message(0) {
            return;
        }

        match self.mode {
            OutputMode::Human if self.use_colors => {
                println!("{}Processing: {}", PACKAGE, style(relative_path).bold());
            }
            OutputMode::Json => self.print_json_file_event("processing", relative_path, None),
            _ => println!("Processing: {}", relative_path),
        }
    }

    pub fn file_success(&self, relative_path: &str, destination: &Path) {
        let detail = format!("Moved to {}", destination.display());
        self.print_file_line(MessageType::Success, "Success", relative_path, &detail);
    }

    pub fn file_skipped(&self, relative_path: &str) {
        self.print_file_line(
            MessageType::Info,
            "Skipped",
            relative_path,
            "File or converted file already exists",
        );
    }

    pub fn file_failed(&self, relative_path: &str, reason: &str) {
        self.print_file_line(MessageType::Error, "Failed", relative_path, reason);
    }

    pub fn file_planned(&self, relative_path: &str, destination: &Path) {
        let detail = format!("Would extract to {}", destination.display());
        self.print_file_line(MessageType::Info, "Planned", relative_path, &detail);
    }

    // Summary and reporting
    pub fn print_results(&self, result: &ProcessResult) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                println!();
                if self.use_colors {
                    println!("{}{}", SPARKLES, style("Processing Complete").bold().cyan());
                    println!("  Success: {} file(s)", style(result.success_count).green().bold());
                    println!("  Failed: {} file(s)", style(result.fail_count).red().bold());
                    println!("  Skipped: {} file(s)", style(result.skipped_count).dim());
                } else {
                    println!("=== Processing Complete ===");
                    println!("Success: {} file(s)", result.success_count);
                    println!("Failed: {} file(s)", result.fail_count);
                    println!("Skipped: {} file(s)", result.skipped_count);
                }
                println!();
            }
            OutputMode::Plain => {
                println!("COMPLETED: Processing");
                println!("Success: {} file(s)", result.success_count);
                println!("Failed: {} file(s)", result.fail_count);
                println!("Skipped: {} file(s)", result.skipped_count);
            }
            // The JSON report carries the counts
            OutputMode::Json => {}
        }
    }

    pub fn print_run_report(&self, report: &RunReport) {
        match self.mode {
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            _ => {
                self.print_results(&report.result);
                self.print_failed_files(report);
                if self.should_show_message(1) {
                    let elapsed = (report.finished_at - report.started_at)
                        .to_std()
                        .unwrap_or_default();
                    self.debug(&format!("Time taken: {}", format_duration(elapsed)));
                }
            }
        }
    }

    /// Repeats every failed entry with its reason below the summary.
    pub fn print_failed_files(&self, report: &RunReport) {
        if self.quiet || !report.result.has_failures() {
            return;
        }

        match self.mode {
            OutputMode::Human if self.use_colors => {
                println!("{}{}", CROSS, style("Failed files:").red().bold());
            }
            OutputMode::Json => return,
            _ => println!("Failed files:"),
        }

        for outcome in report.failed_files() {
            if let ProcessFileResult::Failed { reason } = &outcome.result {
                println!("  - {}: {}", outcome.relative_path, reason);
            }
        }
        println!();
    }

    pub fn print_dry_run_plan(&self, plan: &DryRunPlan) {
        match self.mode {
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(plan).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            _ => {
                if self.quiet {
                    return;
                }
                println!();
                println!("=== Dry Run ===");
                println!("Would extract: {} file(s)", plan.extract_count());
                println!("Would skip: {} file(s)", plan.skip_count());
                println!("Rejected: {} file(s)", plan.reject_count());
                println!();
            }
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_file_line(&self, msg_type: MessageType, label: &str, relative_path: &str, detail: &str) {
        let is_error = matches!(msg_type, MessageType::Error);
        if !is_error && !self.should_show_message(0) {
            return;
        }

        match self.mode {
            OutputMode::Json => {
                self.print_json_file_event(&label.to_lowercase(), relative_path, Some(detail))
            }
            OutputMode::Human if self.use_colors => {
                let (emoji, styled) = match msg_type {
                    MessageType::Success => (CHECKMARK, style(label).green().bold()),
                    MessageType::Error => (CROSS, style(label).red().bold()),
                    MessageType::Warning => (WARNING, style(label).yellow().bold()),
                    MessageType::Info => (INFO, style(label).cyan()),
                };
                println!("  {}{}: {}", emoji, styled, detail);
            }
            _ => println!("  {}: {}", label, detail),
        }
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Success => (CHECKMARK, Box::new(|msg| style(msg).green().bold())),
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "Error:",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_file_event(&self, event: &str, relative_path: &str, detail: Option<&str>) {
        self.print_json_object(&serde_json::json!({
            "type": "file",
            "event": event,
            "relative_path": relative_path,
            "detail": detail,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

/// Prints through the formatter while keeping the progress bar intact.
pub struct ProgressAwareOutput<'a> {
    formatter: &'a OutputFormatter,
    progress_manager: Option<&'a crate::ui::ProgressManager>,
}

impl<'a> ProgressAwareOutput<'a> {
    pub fn new(
        formatter: &'a OutputFormatter,
        progress_manager: Option<&'a crate::ui::ProgressManager>,
    ) -> Self {
        Self {
            formatter,
            progress_manager,
        }
    }

    pub fn suspend_and_print<F>(&self, f: F)
    where
        F: FnOnce(&OutputFormatter),
    {
        if let Some(pm) = self.progress_manager {
            pm.suspend(|| f(self.formatter));
        } else {
            f(self.formatter);
        }
    }

    pub fn file_start(&self, relative_path: &str) {
        self.suspend_and_print(|f| f.file_start(relative_path));
    }

    pub fn file_success(&self, relative_path: &str, destination: &Path) {
        self.suspend_and_print(|f| f.file_success(relative_path, destination));
    }

    pub fn file_skipped(&self, relative_path: &str) {
        self.suspend_and_print(|f| f.file_skipped(relative_path));
    }

    pub fn file_failed(&self, relative_path: &str, reason: &str) {
        self.suspend_and_print(|f| f.file_failed(relative_path, reason));
    }

    pub fn file_planned(&self, relative_path: &str, destination: &Path) {
        self.suspend_and_print(|f| f.file_planned(relative_path, destination));
    }
}
