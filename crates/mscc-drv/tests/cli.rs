//! CLI smoke tests against the built `mscc` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

#[test]
fn compiles_a_valid_source_file_and_writes_the_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("input.ms");
    let output_path = dir.path().join("output.py");
    std::fs::write(&source_path, "note n = A4; int d = 500; play(n, d);").unwrap();

    Command::cargo_bin("mscc")
        .unwrap()
        .arg(&source_path)
        .arg("--output")
        .arg(&output_path)
        .assert()
        .success();

    let artifact = std::fs::read_to_string(&output_path).unwrap();
    assert!(artifact.contains("def run(quads):"));
}

#[test]
fn reports_a_single_diagnostic_line_and_exits_non_zero_on_type_error() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("input.ms");
    std::fs::write(&source_path, "int n = A4;").unwrap();

    Command::cargo_bin("mscc")
        .unwrap()
        .arg(&source_path)
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("Error on line 1:"));
}

#[test]
fn missing_source_file_is_reported_as_an_io_error_on_line_zero() {
    let mut missing = tempfile::NamedTempFile::new().unwrap();
    missing.write_all(b"").unwrap();
    let path = missing.path().to_path_buf();
    drop(missing);
    std::fs::remove_file(&path).ok();

    Command::cargo_bin("mscc")
        .unwrap()
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("Error on line 0:"));
}
