//! # Result Loader Module / 结果加载模块
//!
//! Discovers the per-shard result files in a directory and parses each one into a
//! [`RunResult`]. A file that cannot be read or parsed is skipped with a warning so
//! one corrupt shard never erases the results of the others.
//!
//! All defaulting of the permissive upstream JSON happens here: the raw records below
//! mirror the upstream shape with every field optional, and `RawRunResult::into_run`
//! turns them into the strict model.
//!
//! 在目录中发现分片结果文件，并将每个文件解析为 [`RunResult`]。
//! 无法读取或解析的文件会被跳过并发出警告，因此单个损坏的分片不会抹掉其他分片的结果。
//! 所有针对宽松上游 JSON 的默认值处理都集中在这里。

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::models::{RunResult, StateCounts, Suite, Test, TestError, TestState};

/// Why a single result file was excluded from aggregation.
/// 单个结果文件被排除在聚合之外的原因。
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected document in {path}: expected an object, found {found}")]
    Shape { path: PathBuf, found: &'static str },
}

impl LoadError {
    /// The file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Read { path, .. }
            | LoadError::Parse { path, .. }
            | LoadError::Shape { path, .. } => path,
        }
    }
}

/// Everything the loader learned about one results directory.
/// 加载器从一个结果目录中获得的全部信息。
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Successfully parsed runs, in discovery order. / 成功解析的运行结果，按发现顺序排列。
    pub runs: Vec<RunResult>,
    /// Number of matching files the loader tried to parse. / 加载器尝试解析的匹配文件数。
    pub attempted: usize,
    /// Files that were skipped, with the reason. / 被跳过的文件及原因。
    pub failures: Vec<LoadError>,
}

impl LoadOutcome {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawRunResult {
    #[serde(default)]
    suites: Option<Vec<RawSuite>>,
    #[serde(default)]
    state: Option<RawStateCounts>,
}

#[derive(Debug, Deserialize)]
struct RawSuite {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    tests: Option<Vec<RawTest>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawTest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    error: Option<RawError>,
}

#[derive(Debug, Deserialize)]
struct RawError {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawStateCounts {
    #[serde(default)]
    passed: Option<u64>,
    #[serde(default)]
    failed: Option<u64>,
    #[serde(default)]
    skipped: Option<u64>,
}

impl RawRunResult {
    fn into_run(self, source: PathBuf) -> RunResult {
        let suites = self
            .suites
            .unwrap_or_default()
            .into_iter()
            .map(RawSuite::into_suite)
            .collect();
        let state = self.state.map(RawStateCounts::into_counts).unwrap_or_default();
        RunResult {
            source,
            suites,
            state,
        }
    }
}

impl RawSuite {
    fn into_suite(self) -> Suite {
        Suite {
            name: self.name.unwrap_or_default(),
            tests_listed: self.tests.is_some(),
            tests: self
                .tests
                .unwrap_or_default()
                .into_iter()
                .map(RawTest::into_test)
                .collect(),
            extra: self.extra,
        }
    }
}

impl RawTest {
    fn into_test(self) -> Test {
        Test {
            name: self.name.unwrap_or_default(),
            state: TestState::from_raw(self.state.as_deref()),
            duration_ms: self.duration.map(duration_to_ms).unwrap_or(0),
            error: self.error.map(|e| TestError { message: e.message }),
        }
    }
}

impl RawStateCounts {
    fn into_counts(self) -> StateCounts {
        StateCounts {
            passed: self.passed.unwrap_or(0),
            failed: self.failed.unwrap_or(0),
            skipped: self.skipped.unwrap_or(0),
        }
    }
}

/// Durations are non-negative whole milliseconds; fractional or negative inputs are clamped.
fn duration_to_ms(raw: f64) -> u64 {
    if raw.is_finite() && raw > 0.0 {
        raw.round() as u64
    } else {
        0
    }
}

/// Parses one result document. The outer value must be a JSON object.
///
/// 解析单个结果文档。外层值必须是 JSON 对象。
pub fn parse_run(content: &str, source: PathBuf) -> Result<RunResult, LoadError> {
    let value: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            return Err(LoadError::Parse {
                path: source,
                source: e,
            });
        }
    };

    // serde would happily read a struct out of a JSON array.
    if !value.is_object() {
        return Err(LoadError::Shape {
            path: source,
            found: json_kind(&value),
        });
    }

    match serde_json::from_value::<RawRunResult>(value) {
        Ok(raw) => Ok(raw.into_run(source)),
        Err(e) => Err(LoadError::Parse {
            path: source,
            source: e,
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Reads and parses a single result file.
pub fn load_run(path: &Path) -> Result<RunResult, LoadError> {
    let content = fs::read_to_string(path).map_err(|e| LoadError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_run(&content, path.to_path_buf())
}

/// Lists the result files in `dir` whose name starts with `prefix` and ends in `.json`.
/// Files are returned sorted by name, which makes discovery order stable across
/// platforms; upstream names embed a date and timestamp, so this is also chronological.
/// A missing directory yields an empty list.
///
/// 列出 `dir` 中名称以 `prefix` 开头且以 `.json` 结尾的结果文件。
/// 文件按名称排序返回，使发现顺序在不同平台上保持稳定。目录不存在时返回空列表。
pub fn discover_result_files(dir: &Path, prefix: &str) -> io::Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_result_file(path, prefix))
        .collect();
    files.sort();
    Ok(files)
}

fn is_result_file(path: &Path, prefix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(prefix) && name.ends_with(".json"))
}

/// Loads every result file in `dir`, skipping (and logging) the ones that fail.
///
/// # Errors
/// Only fails when the directory exists but cannot be listed. Per-file problems are
/// collected in [`LoadOutcome::failures`] instead.
///
/// 加载 `dir` 中的所有结果文件，跳过（并记录）失败的文件。
/// 仅当目录存在但无法列出时才返回错误。
pub fn load_results(dir: &Path, prefix: &str) -> io::Result<LoadOutcome> {
    let files = discover_result_files(dir, prefix)?;
    let mut outcome = LoadOutcome {
        attempted: files.len(),
        ..LoadOutcome::default()
    };

    for path in files {
        match load_run(&path) {
            Ok(run) => {
                debug!(
                    file = %path.display(),
                    suites = run.suites.len(),
                    "parsed result file"
                );
                outcome.runs.push(run);
            }
            Err(e) => {
                warn!(file = %e.path().display(), error = %e, "skipping unparseable result file");
                outcome.failures.push(e);
            }
        }
    }

    Ok(outcome)
}
