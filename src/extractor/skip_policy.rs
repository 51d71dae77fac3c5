use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Why a target does not need to be extracted again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TargetExists,
    ConvertedExists(PathBuf),
}

/// Returns the path a downstream converter writes for `target`, if its
/// format is one that gets converted.
///
/// `.msg` files become `.json` (extension replaced), `.bxm` files become
/// `.bxm.xml` (suffix appended).
pub fn converted_sibling(target: &Path) -> Option<PathBuf> {
    let extension = target
        .extension()
        .and_then(OsStr::to_str)
        .map(|ext| ext.to_ascii_lowercase())?;

    match extension.as_str() {
        "msg" => Some(target.with_extension("json")),
        "bxm" => {
            let mut sibling = target.as_os_str().to_os_string();
            sibling.push(".xml");
            Some(PathBuf::from(sibling))
        }
        _ => None,
    }
}

pub fn skip_reason(target: &Path) -> Option<SkipReason> {
    if target.is_file() {
        return Some(SkipReason::TargetExists);
    }

    converted_sibling(target)
        .filter(|sibling| sibling.is_file())
        .map(SkipReason::ConvertedExists)
}

pub fn should_skip(target: &Path) -> bool {
    skip_reason(target).is_some()
}
