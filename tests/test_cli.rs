//! CLI integration tests.
//! Runs the `grin` binary against scratch files.

use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn grin_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_grin"))
}

#[test]
fn test_cli_help() {
    grin_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Huffman file compressor"))
        .stdout(predicate::str::contains("encode"))
        .stdout(predicate::str::contains("decode"));
}

#[test]
fn test_cli_encode_decode_roundtrip() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("poem.txt");
    let packed = dir.path().join("poem.grin");
    let output = dir.path().join("poem.out");

    let text = "Tyger Tyger, burning bright,\nIn the forests of the night;\n".repeat(30);
    fs::write(&input, &text).unwrap();

    grin_cmd()
        .arg("encode")
        .arg(&input)
        .arg(&packed)
        .assert()
        .success()
        .stdout(predicate::str::contains("Encoded"));

    let bytes = fs::read(&packed).unwrap();
    assert_eq!(&bytes[..4], &[0x00, 0x00, 0x07, 0x36]);

    grin_cmd()
        .arg("decode")
        .arg(&packed)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Decoded"));

    assert_eq!(fs::read_to_string(&output).unwrap(), text);
}

#[test]
fn test_cli_rejects_foreign_file() {
    let dir = TempDir::new().unwrap();
    let bogus = dir.path().join("bogus.grin");
    let output = dir.path().join("out.txt");
    fs::write(&bogus, b"definitely not compressed").unwrap();

    grin_cmd()
        .arg("decode")
        .arg(&bogus)
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a valid .grin file"));

    assert!(!output.exists());
}

#[test]
fn test_cli_inspect_json() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("abc.txt");
    let packed = dir.path().join("abc.grin");
    fs::write(&input, "AAAAABBC").unwrap();

    grin_cmd()
        .arg("encode")
        .arg(&input)
        .arg(&packed)
        .assert()
        .success();

    let output = grin_cmd()
        .arg("inspect")
        .arg(&packed)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["leaves"], 4);
    assert_eq!(report["codes"][0]["code"], "1");
}

#[test]
fn test_cli_inspect_tree() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("abc.txt");
    let packed = dir.path().join("abc.grin");
    fs::write(&input, "AAAAABBC").unwrap();

    grin_cmd().arg("encode").arg(&input).arg(&packed).assert().success();

    grin_cmd()
        .arg("inspect")
        .arg(&packed)
        .assert()
        .success()
        .stdout(predicate::str::contains("HUFFMAN TREE"))
        .stdout(predicate::str::contains("[EOF]"));
}

#[test]
fn test_cli_unknown_command() {
    grin_cmd().arg("squash").assert().failure();
}
