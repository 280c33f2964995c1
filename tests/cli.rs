use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn validate_bin() -> &'static str {
    env!("CARGO_BIN_EXE_sxd-validate")
}

fn run_validate(args: &[&Path]) -> Output {
    Command::new(validate_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run sxd-validate")
}

fn write_xml(dir: &TempDir, name: &str, xml: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, xml).expect("write xml");
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn valid_files_exit_successfully() {
    let dir = TempDir::new().expect("create temp dir");
    let a = write_xml(&dir, "a.xml", "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<a><b>1</b></a>\n");
    let b = write_xml(&dir, "b.xml", "<!-- hi --><b/>");

    let out = run_validate(&[a.as_path(), b.as_path()]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let expected = format!(
        "File: {}\nOK.\n--------\nFile: {}\nOK.\n--------\n",
        a.display(),
        b.display()
    );
    assert_eq!(stdout(&out), expected);
}

#[test]
fn one_invalid_file_fails_the_run() {
    let dir = TempDir::new().expect("create temp dir");
    let good = write_xml(&dir, "good.xml", "<a/>");
    let bad = write_xml(&dir, "bad.xml", "<a><b></a>");

    let out = run_validate(&[good.as_path(), bad.as_path()]);

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("invalid tag: 'a', expected 'b'"), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out).matches("--------").count(), 2);
}

#[test]
fn empty_file_is_reported() {
    let dir = TempDir::new().expect("create temp dir");
    let empty = write_xml(&dir, "empty.xml", "");

    let out = run_validate(&[empty.as_path()]);

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("empty file"), "stderr: {}", stderr(&out));
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().expect("create temp dir");
    let missing = dir.path().join("missing.xml");

    let out = run_validate(&[missing.as_path()]);

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("could not open file"), "stderr: {}", stderr(&out));
}

#[test]
fn no_files_is_a_usage_error() {
    let out = run_validate(&[]);

    assert!(!out.status.success());
    assert!(stdout(&out).is_empty());
}

#[test]
fn quiet_hides_ok_lines() {
    let dir = TempDir::new().expect("create temp dir");
    let a = write_xml(&dir, "a.xml", "<a/>");

    let out = Command::new(validate_bin())
        .arg("--quiet")
        .arg(&a)
        .output()
        .expect("run sxd-validate");

    assert!(out.status.success());
    assert!(!stdout(&out).contains("OK."));
}
