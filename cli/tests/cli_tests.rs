//! CLI binary integration tests using assert_cmd + predicates.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("jsonmock").expect("binary should exist")
}

fn example_payload() -> String {
    serde_json::json!({
        "id": 1,
        "name": "a",
        "tags": ["x", "y"]
    })
    .to_string()
}

// ── Convert ─────────────────────────────────────────────────────────────────

#[test]
fn test_convert_json_payload_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("payload.json");
    fs::write(&input, example_payload()).unwrap();

    cmd()
        .args(["convert", input.to_str().unwrap()])
        .args(["--root-name", "Item"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"jsonSchema\""))
        .stdout(predicate::str::contains("\"definitions\""))
        .stdout(predicate::str::contains("export interface Item"));
}

#[test]
fn test_convert_to_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("payload.json");
    let output = dir.path().join("out.json");
    fs::write(&input, example_payload()).unwrap();

    cmd()
        .args(["convert", input.to_str().unwrap()])
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .success();

    let content = fs::read_to_string(&output).expect("output file should exist");
    let parsed: serde_json::Value =
        serde_json::from_str(&content).expect("output should be valid JSON");
    assert!(parsed["jsonSchema"]["definitions"]["RootObject"].is_object());
}

#[test]
fn test_convert_interface_text() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("types.ts");
    fs::write(
        &input,
        "export interface User {\n  id: number;\n  name: string;\n}",
    )
    .unwrap();

    cmd()
        .args(["convert", input.to_str().unwrap()])
        .args(["--from", "ts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"$ref\""))
        .stdout(predicate::str::contains("User"));
}

#[test]
fn test_convert_invalid_json_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "{ not json").unwrap();

    cmd()
        .args(["convert", input.to_str().unwrap()])
        .args(["--from", "json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse input as JSON"));
}

// ── Generate ────────────────────────────────────────────────────────────────

#[test]
fn test_generate_from_schema() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("schema.json");
    fs::write(
        &input,
        serde_json::json!({
            "type": "object",
            "properties": {
                "id": { "type": "integer", "minimum": 1, "maximum": 5 }
            },
            "required": ["id"]
        })
        .to_string(),
    )
    .unwrap();

    cmd()
        .args(["generate", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"data\""))
        .stdout(predicate::str::contains("\"id\""));
}

#[test]
fn test_generate_seeded_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("payload.json");
    fs::write(&input, example_payload()).unwrap();

    let run = || {
        let output = cmd()
            .args(["generate", input.to_str().unwrap()])
            .args(["--raw-json", "--seed", "42", "--format", "compact"])
            .output()
            .expect("command should run");
        assert!(output.status.success());
        String::from_utf8(output.stdout).unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_generate_raw_json_file_url() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("payload.json");
    fs::write(
        &input,
        serde_json::json!({ "file_url": "http://x" }).to_string(),
    )
    .unwrap();

    let output = cmd()
        .args(["generate", input.to_str().unwrap()])
        .args(["--raw-json", "--format", "compact"])
        .output()
        .expect("command should run");
    assert!(output.status.success());

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert!(parsed["data"]["file_url"].is_string());
}

#[test]
fn test_generate_unresolvable_ref_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("schema.json");
    fs::write(
        &input,
        serde_json::json!({ "$ref": "#/definitions/Ghost" }).to_string(),
    )
    .unwrap();

    cmd()
        .args(["generate", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error generating data"));
}
