// Regression tests for the uastify binary: output formats, exit codes and
// miette diagnostics on failure.

use std::fs;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::tempdir;

const SAMPLE: &str = "tests/fixtures/python/sample.json";

fn uastify() -> Command {
    Command::cargo_bin("uastify").unwrap()
}

#[test]
fn parse_prints_annotated_json() {
    let output = uastify().args(["parse", SAMPLE]).output().unwrap();
    assert!(output.status.success());
    let tree: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tree["internal_type"], "Module");
    assert_eq!(tree["roles"], serde_json::json!(["File"]));
    assert_eq!(tree["children"][0]["label"], "body");
}

#[test]
fn parse_outline_is_readable() {
    uastify()
        .args(["parse", SAMPLE, "--outline"])
        .assert()
        .success()
        .stdout(contains("Module(File)").and(contains("body: ImportFrom(ImportDeclaration) \"os\"")));
}

#[test]
fn parse_with_manifest_driver() {
    uastify()
        .args([
            "parse",
            "tests/fixtures/drivers/toy_program.json",
            "--driver",
            "tests/fixtures/drivers/toy.yaml",
            "--compact",
        ])
        .assert()
        .success()
        .stdout(contains("\"internal_type\":\"Program\"").and(contains("\"OpAdd\"")));
}

#[test]
fn cli_reports_miette_diagnostics_on_error() {
    let dir = tempdir().unwrap();
    let bad = dir.path().join("untyped.json");
    fs::write(&bad, r#"{"body": []}"#).unwrap();

    uastify()
        .arg("parse")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(contains("uastify::build::no_internal_type").or(contains("help:")));
}

#[test]
fn unknown_language_lists_alternatives() {
    uastify()
        .args(["parse", SAMPLE, "--language", "cobol"])
        .assert()
        .failure()
        .stderr(contains("cobol").and(contains("python")));
}

#[test]
fn bench_stops_at_first_failure() {
    let dir = tempdir().unwrap();
    fs::copy(SAMPLE, dir.path().join("a.json")).unwrap();
    fs::write(dir.path().join("b.json"), r#"{"ast_type": "Expression"}"#).unwrap();
    fs::copy(SAMPLE, dir.path().join("c.json")).unwrap();

    uastify()
        .arg("bench")
        .arg("python")
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(contains("a.json").and(contains("b.json")).and(contains("c.json").not()))
        .stderr(contains("root must be Module"));
}

#[test]
fn bench_empty_file_ends_the_run_successfully() {
    let dir = tempdir().unwrap();
    fs::copy(SAMPLE, dir.path().join("a.json")).unwrap();
    fs::write(dir.path().join("b.json"), "").unwrap();
    fs::write(dir.path().join("c.json"), "not even json").unwrap();

    uastify()
        .arg("bench")
        .arg("python")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("1 file(s)").and(contains("c.json").not()));
}

#[test]
fn bench_whitespace_file_is_an_ordinary_input() {
    let dir = tempdir().unwrap();
    fs::copy(SAMPLE, dir.path().join("a.json")).unwrap();
    fs::write(dir.path().join("b.json"), "\n  \n").unwrap();
    fs::copy(SAMPLE, dir.path().join("c.json")).unwrap();

    uastify()
        .arg("bench")
        .arg("python")
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(contains("b.json").and(contains("c.json").not()))
        .stderr(contains("uastify::pipeline::decode").or(contains("decode")));
}

#[test]
fn roles_lists_the_vocabulary() {
    uastify()
        .arg("roles")
        .assert()
        .success()
        .stdout(contains("AssignmentVariable\n").and(contains("CallReceiver\n")));
}

#[test]
fn config_dumps_the_python_builder() {
    uastify()
        .args(["config", "--language", "python"])
        .assert()
        .success()
        .stdout(contains("internal_type_key: ast_type").and(contains("LiteralValue")));
}
