//! CLI end-to-end tests
//!
//! Tests for the docforge command-line interface. None of these need an
//! office suite installed: they stop before any conversion is attempted.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the docforge binary
#[allow(deprecated)]
fn docforge_cmd() -> Command {
    Command::cargo_bin("docforge").unwrap()
}

/// Config pointing at an office binary that does not exist.
fn missing_soffice_config(dir: &Path) -> PathBuf {
    let path = dir.join("docforge.toml");
    fs::write(
        &path,
        "[converter]\nsoffice_path = \"/nonexistent/libreoffice/soffice\"\n",
    )
    .unwrap();
    path
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = docforge_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = docforge_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("docforge"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("convert"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = docforge_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("docforge"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = docforge_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_batch_help() {
    let mut cmd = docforge_cmd();
    cmd.args(["batch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("several at a time"))
        .stdout(predicate::str::contains("--jobs"));
}

#[test]
fn test_cli_check_tools_command() {
    let mut cmd = docforge_cmd();
    cmd.arg("check-tools").assert().success().stdout(
        predicate::str::contains("soffice").or(predicate::str::contains("libreoffice")),
    );
}

#[test]
fn test_cli_validate_default_config() {
    let mut cmd = docforge_cmd();
    cmd.arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("using defaults"))
        .stdout(predicate::str::contains("Concurrency limit: 3"));
}

#[test]
fn test_cli_validate_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("docforge.toml");
    fs::write(&path, "[batch]\nconcurrency_limit = 6\n").unwrap();

    let mut cmd = docforge_cmd();
    cmd.arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Concurrency limit: 6"));
}

#[test]
fn test_cli_validate_rejects_zero_limit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("docforge.toml");
    fs::write(&path, "[batch]\nconcurrency_limit = 0\n").unwrap();

    let mut cmd = docforge_cmd();
    cmd.arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("concurrency_limit"));
}

#[test]
fn test_cli_validate_missing_file() {
    let mut cmd = docforge_cmd();
    cmd.args(["validate", "/nonexistent/docforge.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_cli_convert_missing_input() {
    let mut cmd = docforge_cmd();
    cmd.args(["convert", "/nonexistent/report.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn test_cli_convert_wrong_extension() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    fs::write(&input, "plain text").unwrap();

    let mut cmd = docforge_cmd();
    cmd.arg("convert")
        .arg(&input)
        .args(["--kind", "pdf-to-word"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("notes.txt is not a .pdf file"));
}

#[test]
fn test_cli_convert_unknown_direction() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    fs::write(&input, "plain text").unwrap();

    let mut cmd = docforge_cmd();
    cmd.arg("convert")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pass --kind"));
}

#[test]
fn test_cli_batch_invalid_kind() {
    let mut cmd = docforge_cmd();
    cmd.args(["batch", "--kind", "png-to-gif", "a.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("png-to-gif"));
}

#[test]
fn test_cli_batch_empty_directory() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "x").unwrap();

    let mut cmd = docforge_cmd();
    cmd.args(["batch", "--kind", "word-to-pdf"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No .docx files found to convert"));
}

#[test]
fn test_cli_batch_requires_office_suite() {
    let dir = tempdir().unwrap();
    let config = missing_soffice_config(dir.path());
    fs::write(dir.path().join("a.pdf"), b"%PDF-1.4\n").unwrap();

    let mut cmd = docforge_cmd();
    cmd.arg("--config")
        .arg(&config)
        .args(["batch", "--kind", "pdf-to-word"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("LibreOffice is required"));
}

#[test]
fn test_cli_convert_requires_office_suite() {
    let dir = tempdir().unwrap();
    let config = missing_soffice_config(dir.path());
    let input = dir.path().join("letter.docx");
    fs::write(&input, b"PK").unwrap();

    let mut cmd = docforge_cmd();
    cmd.arg("--config")
        .arg(&config)
        .arg("convert")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("LibreOffice is required"));
}

#[test]
fn test_cli_batch_rejects_clashing_outputs() {
    let dir = tempdir().unwrap();
    for sub in ["q1", "q2"] {
        fs::create_dir_all(dir.path().join(sub)).unwrap();
        fs::write(dir.path().join(sub).join("report.pdf"), b"%PDF-1.4\n").unwrap();
    }
    let out = dir.path().join("out");

    let mut cmd = docforge_cmd();
    cmd.args(["batch", "--kind", "pdf-to-word", "--output-dir"])
        .arg(&out)
        .arg(dir.path().join("q1"))
        .arg(dir.path().join("q2"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("would both be written to"));

    // Rejected before anything was created.
    assert!(!out.exists());
}
