pub mod data_tools;
pub mod relocator;
pub mod result;
pub mod skip_policy;

pub use data_tools::{ArchiveExtractor, DataTools};
pub use relocator::{move_file, Relocator};
pub use result::{
    DryRunPlan, FileOutcome, PlannedAction, PlannedEntry, ProcessFileResult, ProcessResult,
    RunReport,
};
pub use skip_policy::{should_skip, skip_reason, SkipReason};
