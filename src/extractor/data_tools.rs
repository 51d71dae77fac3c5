use crate::error::{ExtractError, Result};
use crate::paths::PathConfig;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;

/// Pulls a single file out of the packed archive.
///
/// On success the file must be present at `<data folder>/<relative_path>`.
pub trait ArchiveExtractor {
    fn extract(&self, relative_path: &str) -> Result<()>;
}

/// Runs `GBFRDataTools extract -i <index> -f <relative path>`.
#[derive(Debug, Clone)]
pub struct DataTools {
    tool: PathBuf,
    data_index: PathBuf,
}

impl DataTools {
    pub fn new<T: Into<PathBuf>, I: Into<PathBuf>>(tool: T, data_index: I) -> Self {
        Self {
            tool: tool.into(),
            data_index: data_index.into(),
        }
    }

    pub fn from_paths(paths: &PathConfig) -> Self {
        Self::new(&paths.data_tools, &paths.data_index)
    }

    /// Arguments are passed as separate argv entries, so paths with spaces
    /// need no quoting.
    pub fn build_command(&self, relative_path: &str) -> Command {
        let mut command = Command::new(&self.tool);
        command
            .arg("extract")
            .arg("-i")
            .arg(&self.data_index)
            .arg("-f")
            .arg(relative_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

impl ArchiveExtractor for DataTools {
    fn extract(&self, relative_path: &str) -> Result<()> {
        tracing::info!(
            "Executing: {} extract -i {} -f {}",
            self.tool.display(),
            self.data_index.display(),
            relative_path
        );

        let start = Instant::now();
        let output = self
            .build_command(relative_path)
            .output()
            .map_err(|source| ExtractError::ToolLaunch {
                tool: self.tool.display().to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            tracing::debug!("Tool output: {}", stdout.trim());
        }

        tracing::info!(
            "Tool finished in {:.2}s with {}",
            start.elapsed().as_secs_f32(),
            output.status
        );

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = if stderr.trim().is_empty() {
            format!("tool exited with {}", output.status)
        } else {
            stderr.trim().to_string()
        };

        Err(ExtractError::ExtractionFailed {
            code: output.status.code(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_command_arguments() {
        let tools = DataTools::new("/tools/GBFRDataTools", "/games/Granblue Fantasy Relink/data.i");
        let command = tools.build_command("system/table/text.msg");

        assert_eq!(command.get_program(), OsStr::new("/tools/GBFRDataTools"));
        let args: Vec<&OsStr> = command.get_args().collect();
        assert_eq!(
            args,
            vec![
                OsStr::new("extract"),
                OsStr::new("-i"),
                OsStr::new("/games/Granblue Fantasy Relink/data.i"),
                OsStr::new("-f"),
                OsStr::new("system/table/text.msg"),
            ]
        );
    }

    #[test]
    fn test_missing_tool_is_launch_failure() {
        let tools = DataTools::new("/definitely/not/a/GBFRDataTools", "data.i");
        let result = tools.extract("a/b.msg");
        assert!(matches!(result, Err(ExtractError::ToolLaunch { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_zero_exit_is_success() {
        let tools = DataTools::new("true", "data.i");
        assert!(tools.extract("a/b.msg").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failure() {
        let tools = DataTools::new("false", "data.i");
        match tools.extract("a/b.msg") {
            Err(ExtractError::ExtractionFailed { code, message }) => {
                assert_eq!(code, Some(1));
                assert!(message.contains("exit"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
