//! Integration tests for the rush-demo binary

use super::common::fixtures::sample_program_bytes;
use assert_cmd::Command;
use predicates::prelude::*;
use rush_demo::bytecode::encode_archive;
use tempfile::TempDir;

/// Command with HOME pointed at a scratch directory so logs and config stay
/// out of the real home.
fn rush_demo(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rush-demo").expect("Binary should build");
    cmd.env("HOME", home.path());
    cmd
}

/// Test that the built-in binding table is printed
#[test]
fn test_bindings_lists_defaults() {
    let home = TempDir::new().expect("Failed to create temp dir");
    rush_demo(&home)
        .arg("bindings")
        .assert()
        .success()
        .stdout(predicate::str::contains("  20      0      0     19      9"))
        .stdout(predicate::str::contains("  35      2     10      8     16"));
}

/// Test that config bindings show up alongside the defaults
#[test]
fn test_bindings_include_config_file() {
    let home = TempDir::new().expect("Failed to create temp dir");
    let config = home.path().join("custom.toml");
    std::fs::write(
        &config,
        "[[worlds]]\ndemo_id = 99\nworld = 1\nstage = 2\nx = 3\ny = 4\n",
    )
    .expect("Failed to write config");

    rush_demo(&home)
        .arg("--config")
        .arg(&config)
        .arg("bindings")
        .assert()
        .success()
        .stdout(predicate::str::contains("  99      1      2      3      4"));
}

/// Test JSON output of a decoded chunk
#[test]
fn test_inspect_prints_json() {
    let home = TempDir::new().expect("Failed to create temp dir");
    let archive = home.path().join("demo.bin");
    std::fs::write(&archive, encode_archive(&[sample_program_bytes()]))
        .expect("Failed to write archive");

    rush_demo(&home)
        .arg("inspect")
        .arg(&archive)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"demo_id\": 20"))
        .stdout(predicate::str::contains("\"op\": \"parallel_block\""))
        .stdout(predicate::str::contains("\"errors\": []"));
}

/// Test the text listing with resolved strings
#[test]
fn test_inspect_lists_operation_tree() {
    let home = TempDir::new().expect("Failed to create temp dir");
    let archive = home.path().join("demo.bin");
    std::fs::write(&archive, encode_archive(&[sample_program_bytes()]))
        .expect("Failed to write archive");
    let strings = home.path().join("lang.txt");
    let lines: Vec<String> = (0..100).map(|i| format!("line {i}")).collect();
    std::fs::write(&strings, lines.join("\n")).expect("Failed to write strings");

    rush_demo(&home)
        .arg("inspect")
        .arg(&archive)
        .arg("--strings")
        .arg(&strings)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 1 demo programs decoded"))
        .stdout(predicate::str::contains("world 0 stage 0 at (19, 9)"))
        .stdout(predicate::str::contains("8 top-level of 8 declared, 10 total"))
        .stdout(predicate::str::contains("    MoveCamera(block_x: 22, block_y: 9, frame_count: 4)"))
        .stdout(predicate::str::contains("text: Some(\"line 83\")"));
}

/// Test that a missing archive is reported
#[test]
fn test_inspect_missing_file_fails() {
    let home = TempDir::new().expect("Failed to create temp dir");
    rush_demo(&home)
        .arg("inspect")
        .arg(home.path().join("nope.bin"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}
