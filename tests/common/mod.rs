// Shared test helpers for integration tests
#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Creates a temporary workspace with an empty `test-results` directory.
pub fn setup_test_environment() -> TempDir {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    fs::create_dir_all(temp_dir.path().join("test-results"))
        .expect("Failed to create test-results directory");
    temp_dir
}

/// Writes a result file named `file_name` into `dir`.
pub fn write_result(dir: &Path, file_name: &str, content: &Value) -> PathBuf {
    fs::create_dir_all(dir).expect("Failed to create results directory");
    let path = dir.join(file_name);
    fs::write(&path, serde_json::to_string_pretty(content).unwrap())
        .expect("Failed to write result file");
    path
}

/// Writes raw text as a result file, for malformed inputs.
pub fn write_raw_result(dir: &Path, file_name: &str, content: &str) -> PathBuf {
    fs::create_dir_all(dir).expect("Failed to create results directory");
    let path = dir.join(file_name);
    fs::write(&path, content).expect("Failed to write result file");
    path
}

/// A test record as the runner's reporter writes it.
pub fn test_record(name: &str, state: &str, duration: f64) -> Value {
    json!({ "name": name, "state": state, "duration": duration })
}

/// A failed test record carrying an error message.
pub fn failed_record(name: &str, message: &str) -> Value {
    json!({
        "name": name,
        "state": "failed",
        "duration": 12,
        "error": { "message": message }
    })
}

/// A full run document with the given suites and counters.
pub fn run_document(suites: Vec<Value>, passed: u64, failed: u64, skipped: u64) -> Value {
    json!({
        "suites": suites,
        "state": { "passed": passed, "failed": failed, "skipped": skipped }
    })
}

pub fn suite(name: &str, tests: Vec<Value>) -> Value {
    json!({ "name": name, "tests": tests })
}

/// Writes a configuration file pointing every directory into `root`.
pub fn write_config(root: &Path, extra: &str) -> PathBuf {
    let path = root.join("ShardReport.toml");
    let content = format!(
        r#"
language = "en"
results_dir = "{results}"
reports_dir = "{reports}"
raw_results_dir = "{raw}"
{extra}
"#,
        results = toml_path(&root.join("test-results")),
        reports = toml_path(&root.join("test-reports")),
        raw = toml_path(&root.join("allure-results")),
    );
    fs::write(&path, content).expect("Failed to write config file");
    path
}

fn toml_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
