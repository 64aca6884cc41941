//! End-to-end tests driving the ccheck binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ccheck_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ccheck"))
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("failed to write fixture");
    path
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::new(ccheck_bin());
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::new(ccheck_bin());
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ccheck"));
}

#[test]
fn test_cli_requires_paths() {
    let mut cmd = Command::new(ccheck_bin());
    cmd.assert().failure();
}

#[test]
fn test_check_clean_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "clean.c", "int main(void)\n{\n\treturn 0;\n}\n");

    let mut cmd = Command::new(ccheck_bin());
    cmd.arg(&path);
    cmd.assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn test_check_reports_trailing_whitespace() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "s1.c", "int x = 1;  \n");

    let mut cmd = Command::new(ccheck_bin());
    cmd.arg(&path);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("1:12: Whitespace at end of line"));
}

#[test]
fn test_check_reports_wrong_indentation() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "s2.c", "int f(void)\n{\n  return 0;\n}\n");

    let mut cmd = Command::new(ccheck_bin());
    cmd.arg(&path);
    cmd.assert()
        .failure()
        .stdout(
            predicate::str::contains("3:3: Wrong indentation: found 0 tabs, should be 1 tabs")
                .and(predicate::str::contains(
                    "3:3: Non-continuation line should not have any spaces for indentation (found 2)",
                )),
        );
}

#[test]
fn test_fix_rewrites_file_and_keeps_backup() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "s1.c", "int x = 1;  \n");

    let mut cmd = Command::new(ccheck_bin());
    cmd.arg("--fix").arg(&path);
    cmd.assert().success();

    assert_eq!(fs::read_to_string(&path).unwrap(), "int x = 1;\n");
    let backup = dir.path().join("s1.c.orig");
    assert_eq!(fs::read_to_string(&backup).unwrap(), "int x = 1;  \n");
}

#[test]
fn test_fix_does_not_clobber_existing_backup() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "s1.c", "int x = 1;  \n");
    let backup = write_file(dir.path(), "s1.c.orig", "original content\n");

    let mut cmd = Command::new(ccheck_bin());
    cmd.arg("--fix").arg(&path);
    cmd.assert().success();

    assert_eq!(fs::read_to_string(&backup).unwrap(), "original content\n");
    assert_eq!(fs::read_to_string(&path).unwrap(), "int x = 1;\n");
}

#[test]
fn test_fix_is_idempotent_across_runs() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "messy.c", "if (x){\n  return;\n}\n");

    for _ in 0..2 {
        let mut cmd = Command::new(ccheck_bin());
        cmd.arg("--fix").arg(&path);
        cmd.assert().success();
    }

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "if (x) {\n\treturn;\n}\n"
    );
}

#[test]
fn test_fixed_file_passes_check() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "messy.c", "f( x);\n");

    let mut cmd = Command::new(ccheck_bin());
    cmd.arg("--fix").arg(&path);
    cmd.assert().success();

    let mut cmd = Command::new(ccheck_bin());
    cmd.arg(&path);
    cmd.assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn test_parse_error_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "bad.c", "int x = ;\n");

    let mut cmd = Command::new(ccheck_bin());
    cmd.arg(&path);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("expected"));
}

#[test]
fn test_multiple_files_one_dirty() {
    let dir = TempDir::new().unwrap();
    let clean = write_file(dir.path(), "clean.c", "int x;\n");
    let dirty = write_file(dir.path(), "dirty.c", "int y = 1;  \n");

    let mut cmd = Command::new(ccheck_bin());
    cmd.arg(&clean).arg(&dirty);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("dirty.c:1:12"));
}

#[test]
fn test_dump_toks() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "x.c", "int x;\n");

    let mut cmd = Command::new(ccheck_bin());
    cmd.arg("--dump-toks").arg(&path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Int \"int\"").and(predicate::str::contains("Eof")));
}

#[test]
fn test_dump_ast() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "x.c", "int f(void)\n{\n\treturn 0;\n}\n");

    let mut cmd = Command::new(ccheck_bin());
    cmd.arg("--dump-ast").arg(&path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("gdecln").and(predicate::str::contains("return")));
}

#[test]
fn test_selftest() {
    let mut cmd = Command::new(ccheck_bin());
    cmd.arg("--test");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("selftest trailing-whitespace: ok"));
}

#[test]
fn test_diagnostics_prefixed_with_path() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "s1.c", "int x = 1;  \n");

    let mut cmd = Command::new(ccheck_bin());
    cmd.arg(&path);
    let expected = format!("{}:1:12: Whitespace at end of line", path.display());
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains(expected));
}
