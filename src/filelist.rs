use crate::error::{ExtractError, Result};
use std::path::{Component, Path, PathBuf};

/// Ordered list of relative asset paths read from a mod's file list.
#[derive(Debug, Clone)]
pub struct FileList {
    source: PathBuf,
    entries: Vec<String>,
}

impl FileList {
    /// Reads the list file. An empty list is not an error here; the caller
    /// decides what to do with it.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ExtractError::InputMissing {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let list = Self::parse(path, &content);

        tracing::debug!("Read {} entries from {}", list.len(), path.display());
        Ok(list)
    }

    pub fn parse<P: Into<PathBuf>>(source: P, content: &str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            source: source.into(),
            entries,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

/// Rejects entries that would reach outside the archive's data folder.
///
/// Drive-relative entries such as `C:foo.msg` are neither absolute nor
/// rooted on Windows, but `Path::join` still replaces the base with them.
pub fn validate_relative_path(relative_path: &str) -> Result<()> {
    let path = Path::new(relative_path);
    let escapes = path.is_absolute()
        || path.has_root()
        || path
            .components()
            .any(|component| matches!(component, Component::Prefix(_)))
        || relative_path.starts_with(['/', '\\'])
        || relative_path.split(['/', '\\']).any(|segment| segment == "..");

    if escapes {
        return Err(ExtractError::UnsafeRelativePath {
            path: relative_path.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_trims_and_drops_blank_lines() {
        let list = FileList::parse("list.txt", "  a/b.msg \n\nc/d.bxm");
        assert_eq!(list.entries(), ["a/b.msg", "c/d.bxm"]);
    }

    #[test]
    fn test_parse_keeps_order_and_duplicates() {
        let list = FileList::parse("list.txt", "z.msg\r\na.bxm\r\n   \t\r\nz.msg\r\n");
        let entries: Vec<&str> = list.iter().collect();
        assert_eq!(entries, vec!["z.msg", "a.bxm", "z.msg"]);
    }

    #[test]
    fn test_parse_strips_byte_order_mark() {
        let list = FileList::parse("list.txt", "\u{feff}system/text.msg\n");
        assert_eq!(list.entries(), ["system/text.msg"]);
    }

    #[test]
    fn test_read_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("modded_filelist.txt");
        fs::write(&path, "  a/b.msg \n\nc/d.bxm").unwrap();

        let list = FileList::read(&path).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.source(), path.as_path());
    }

    #[test]
    fn test_read_whitespace_only_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("modded_filelist.txt");
        fs::write(&path, "\n   \n\t\n").unwrap();

        let list = FileList::read(&path).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = FileList::read(temp_dir.path().join("nope.txt"));
        assert!(matches!(result, Err(ExtractError::InputMissing { .. })));
    }

    #[test]
    fn test_relative_path_validation() {
        assert!(validate_relative_path("system/table/text.msg").is_ok());
        assert!(validate_relative_path("ui/..hidden/file.bxm").is_ok());

        assert!(validate_relative_path("../outside.msg").is_err());
        assert!(validate_relative_path("system/../../outside.msg").is_err());
        assert!(validate_relative_path("system\\..\\outside.msg").is_err());
        assert!(validate_relative_path("/etc/passwd").is_err());
    }

    #[cfg(windows)]
    #[test]
    fn test_drive_prefixed_paths_are_rejected() {
        assert!(validate_relative_path("C:foo.msg").is_err());
        assert!(validate_relative_path("C:\\Windows\\system.ini").is_err());
        assert!(validate_relative_path("\\\\server\\share\\a.msg").is_err());
        assert!(validate_relative_path("system\\table\\text.msg").is_ok());
    }
}
