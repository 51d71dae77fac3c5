use crate::paths::PathConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of a single list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessFileResult {
    Success,
    Failed { reason: String },
    Skipped,
}

impl ProcessFileResult {
    pub fn is_failed(&self) -> bool {
        matches!(self, ProcessFileResult::Failed { .. })
    }
}

/// Run-wide tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessResult {
    pub success_count: usize,
    pub fail_count: usize,
    pub skipped_count: usize,
}

impl ProcessResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &ProcessFileResult) {
        match result {
            ProcessFileResult::Success => self.success_count += 1,
            ProcessFileResult::Failed { .. } => self.fail_count += 1,
            ProcessFileResult::Skipped => self.skipped_count += 1,
        }
    }

    /// Files that were actually attempted. Skipped entries are not included.
    pub fn total_count(&self) -> usize {
        self.success_count + self.fail_count
    }

    pub fn has_failures(&self) -> bool {
        self.fail_count > 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub relative_path: String,
    #[serde(flatten)]
    pub result: ProcessFileResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub paths: PathConfig,
    pub result: ProcessResult,
    pub files: Vec<FileOutcome>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn new(paths: PathConfig) -> Self {
        let now = Utc::now();
        Self {
            paths,
            result: ProcessResult::new(),
            files: Vec::new(),
            started_at: now,
            finished_at: now,
        }
    }

    pub fn record<S: Into<String>>(&mut self, relative_path: S, result: ProcessFileResult) {
        self.result.record(&result);
        self.files.push(FileOutcome {
            relative_path: relative_path.into(),
            result,
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
    }

    pub fn failed_files(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| f.result.is_failed())
    }
}

/// What a run would do with one entry, without doing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlannedAction {
    Extract { destination: PathBuf },
    Skip,
    Reject { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannedEntry {
    pub relative_path: String,
    #[serde(flatten)]
    pub action: PlannedAction,
}

#[derive(Debug, Clone, Serialize)]
pub struct DryRunPlan {
    pub paths: PathConfig,
    pub entries: Vec<PlannedEntry>,
}

impl DryRunPlan {
    pub fn new(paths: PathConfig) -> Self {
        Self {
            paths,
            entries: Vec::new(),
        }
    }

    pub fn push<S: Into<String>>(&mut self, relative_path: S, action: PlannedAction) {
        self.entries.push(PlannedEntry {
            relative_path: relative_path.into(),
            action,
        });
    }

    pub fn extract_count(&self) -> usize {
        self.count(|a| matches!(a, PlannedAction::Extract { .. }))
    }

    pub fn skip_count(&self) -> usize {
        self.count(|a| matches!(a, PlannedAction::Skip))
    }

    pub fn reject_count(&self) -> usize {
        self.count(|a| matches!(a, PlannedAction::Reject { .. }))
    }

    fn count(&self, predicate: impl Fn(&PlannedAction) -> bool) -> usize {
        self.entries.iter().filter(|e| predicate(&e.action)).count()
    }
}
