//! Process-contract tests for the `modscope-analyze` binary: exit code 0
//! pairs with exactly one JSON document on stdout, anything else pairs with
//! error text.

use std::fs;
use std::process::{Command, Output};

use modscope_graph::ExtractionResult;
use tempfile::TempDir;

fn run_analyzer(workdir: &TempDir) -> Output {
    Command::new(env!("CARGO_BIN_EXE_modscope-analyze"))
        .current_dir(workdir.path())
        .output()
        .expect("spawn modscope-analyze")
}

fn write_entry(workdir: &TempDir, source: &str) {
    let src = workdir.path().join("src");
    fs::create_dir_all(&src).expect("create src");
    fs::write(src.join("index.js"), source).expect("write entry");
}

#[test]
fn success_emits_one_json_document() {
    let dir = TempDir::new().expect("temp dir");
    write_entry(&dir, r#"import { a, b } from "x";"#);

    let output = run_analyzer(&dir);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let result: ExtractionResult = serde_json::from_str(stdout.trim()).expect("valid JSON shape");
    assert_eq!(result.dependencies.len(), 1);
    assert_eq!(result.dependencies[0].identifiers, ["a", "b"]);
}

#[test]
fn no_bundle_artifact_is_written() {
    let dir = TempDir::new().expect("temp dir");
    write_entry(&dir, r#"import "x";"#);

    let output = run_analyzer(&dir);
    assert!(output.status.success());
    assert!(
        !dir.path().join("dist").exists(),
        "analysis run must not emit a bundle"
    );
}

#[test]
fn syntax_error_exits_nonzero_with_error_text() {
    let dir = TempDir::new().expect("temp dir");
    write_entry(&dir, "import { from ;;;");

    let output = run_analyzer(&dir);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.trim().is_empty(), "expected bundler error text");
    // Error output is not the JSON contract shape.
    assert!(serde_json::from_str::<ExtractionResult>(stderr.trim()).is_err());
}

#[test]
fn missing_entry_exits_nonzero() {
    let dir = TempDir::new().expect("temp dir");

    let output = run_analyzer(&dir);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("src/index.js"));
}

#[test]
fn empty_entry_reports_empty_result() {
    let dir = TempDir::new().expect("temp dir");
    write_entry(&dir, "");

    let output = run_analyzer(&dir);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let result: ExtractionResult = serde_json::from_str(stdout.trim()).expect("valid JSON");
    assert!(result.is_empty());
}
