//! End-to-end tests for the gbfr-extract binary.
//!
//! GBFRDataTools is replaced by `/bin/sh`: invoked as
//! `sh extract -i <index> -f <relative path>`, the shell runs the script
//! named `extract` in the working directory, which plays the tool's part.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Workspace {
    _temp_dir: TempDir,
    root: PathBuf,
    list_file: PathBuf,
}

impl Workspace {
    fn new(entries: &str) -> Self {
        Self::with_list_dir("mods/gbfr.powerup.narmaya/data", entries)
    }

    fn with_list_dir(list_dir: &str, entries: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();

        fs::create_dir_all(root.join("game/data")).unwrap();
        fs::write(root.join("game/data.i"), "").unwrap();

        // Entries containing "fail" make the stand-in tool exit non-zero
        let script = format!(
            "rel=\"$4\"\n\
             case \"$rel\" in\n  *fail*) echo \"cannot find $rel in data.i\" >&2; exit 1 ;;\nesac\n\
             out=\"{data}/$rel\"\n\
             mkdir -p \"$(dirname \"$out\")\"\n\
             printf '%s' \"$rel\" > \"$out\"\n",
            data = root.join("game/data").display()
        );
        fs::create_dir_all(root.join("work")).unwrap();
        fs::write(root.join("work/extract"), script).unwrap();

        let list_dir = root.join(list_dir);
        fs::create_dir_all(&list_dir).unwrap();
        let list_file = list_dir.join("modded_filelist.txt");
        fs::write(&list_file, entries).unwrap();

        Self {
            _temp_dir: temp_dir,
            root,
            list_file,
        }
    }

    fn command(&self) -> Command {
        self.command_with_format("plain")
    }

    fn command_with_format(&self, output_format: &str) -> Command {
        let mut cmd = Command::cargo_bin("gbfr-extract").unwrap();
        cmd.current_dir(self.root.join("work"))
            .env_remove("RUST_LOG")
            .arg(&self.list_file)
            .arg("--data-index")
            .arg(self.root.join("game/data.i"))
            .arg("--data-folder")
            .arg(self.root.join("game/data"))
            .arg("--tool")
            .arg("/bin/sh")
            .arg("--output-format")
            .arg(output_format);
        cmd
    }

    fn staged(&self, relative_path: &str) -> PathBuf {
        self.root
            .join("mods/original/gbfrelink.powerup.narmaya/GBFR/data")
            .join(relative_path)
    }

    fn extracted(&self, relative_path: &str) -> PathBuf {
        self.root.join("game/data").join(relative_path)
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_partial_failure_continues() {
    let ws = Workspace::new("system/table/text.msg\nui/fail_menu.bxm\nmodel/pl0000.mmat\n");

    ws.command()
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Processing: ui/fail_menu.bxm"))
        .stdout(predicate::str::contains("cannot find ui/fail_menu.bxm in data.i"))
        .stdout(predicate::str::contains("Success: 2 file(s)"))
        .stdout(predicate::str::contains("Failed: 1 file(s)"))
        .stdout(predicate::str::contains("Failed files:"))
        .stdout(predicate::str::contains(
            "  - ui/fail_menu.bxm: Extraction failed: cannot find ui/fail_menu.bxm in data.i",
        ));

    assert_eq!(read(&ws.staged("system/table/text.msg")), "system/table/text.msg");
    assert_eq!(read(&ws.staged("model/pl0000.mmat")), "model/pl0000.mmat");
    assert!(!ws.staged("ui/fail_menu.bxm").exists());
    assert!(!ws.extracted("system/table/text.msg").exists());
}

#[test]
fn test_rerun_skips_staged_files() {
    let ws = Workspace::new("system/table/text.msg\nui/menu.bxm\n");

    ws.command().assert().success();

    ws.command()
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped: File or converted file already exists"))
        .stdout(predicate::str::contains("Success: 0 file(s)"))
        .stdout(predicate::str::contains("Failed: 0 file(s)"))
        .stdout(predicate::str::contains("Skipped: 2 file(s)"));
}

#[test]
fn test_converted_files_are_not_extracted_again() {
    let ws = Workspace::new("system/table/text.msg\nui/menu.bxm\n");
    for converted in ["system/table/text.json", "ui/menu.bxm.xml"] {
        let path = ws.staged(converted);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "converted").unwrap();
    }

    ws.command()
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped: 2 file(s)"));

    assert!(!ws.staged("system/table/text.msg").exists());
    assert!(!ws.extracted("system/table/text.msg").exists());
}

#[test]
fn test_empty_list_is_reported() {
    let ws = Workspace::new("\n   \n");

    ws.command()
        .assert()
        .code(6)
        .stderr(predicate::str::contains("File list is empty!"));
}

#[test]
fn test_missing_data_index_aborts() {
    let ws = Workspace::new("system/table/text.msg\n");
    fs::remove_file(ws.root.join("game/data.i")).unwrap();

    ws.command()
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Cannot find data.i"));

    assert!(!ws.root.join("mods/original").exists());
}

#[test]
fn test_missing_configuration() {
    let ws = Workspace::new("system/table/text.msg\n");

    Command::cargo_bin("gbfr-extract")
        .unwrap()
        .current_dir(ws.root.join("work"))
        .env_remove("GBFR_DATA_INDEX")
        .env_remove("GBFR_DATA_FOLDER")
        .env_remove("GBFR_DATA_TOOLS")
        .arg(&ws.list_file)
        .args(["--output-format", "plain"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Missing required setting"));
}

#[test]
fn test_config_file_is_used() {
    let ws = Workspace::new("system/table/text.msg\n");
    let config_path = ws.root.join("work/gbfr-extract.toml");
    fs::write(
        &config_path,
        format!(
            "[game]\ndata_index_path = \"{}\"\ndata_folder_path = \"{}\"\n\n[tool]\ndata_tools_path = \"/bin/sh\"\n",
            ws.root.join("game/data.i").display(),
            ws.root.join("game/data").display()
        ),
    )
    .unwrap();

    Command::cargo_bin("gbfr-extract")
        .unwrap()
        .current_dir(ws.root.join("work"))
        .arg(&ws.list_file)
        .args(["--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: 1 file(s)"));

    assert!(ws.staged("system/table/text.msg").is_file());
}

#[test]
fn test_dry_run_json_plan() {
    let ws = Workspace::new("system/table/text.msg\nui/menu.bxm\n");

    let output = ws
        .command_with_format("json")
        .args(["--dry-run", "--quiet"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["entries"].as_array().unwrap().len(), 2);
    assert_eq!(plan["entries"][0]["action"], "extract");
    assert!(!ws.root.join("mods/original").exists());
}

#[test]
fn test_list_inside_mod_folder_warns_about_layout() {
    let ws = Workspace::with_list_dir("mods/gbfr.powerup.narmaya", "system/table/text.msg\n");

    ws.command()
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "WARNING: List file sits directly in mod folder 'gbfr.powerup.narmaya'",
        ))
        .stdout(predicate::str::contains(
            "<root>/<mod folder>/<subdir>/modded_filelist.txt",
        ));
}

#[test]
fn test_generate_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("settings.toml");

    Command::cargo_bin("gbfr-extract")
        .unwrap()
        .arg("--generate-config")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated sample configuration file"));

    let content = read(&config_path);
    assert!(content.contains("data_tools_path"));
}

#[test]
fn test_help() {
    Command::cargo_bin("gbfr-extract")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("modded_filelist.txt"));
}
