//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the report engine.
//! It includes models for per-shard run results, suites, test outcomes, state counters
//! and the aggregated report handed to the renderers.
//!
//! 此模块定义了整个报告引擎中使用的核心数据结构。
//! 它包括分片运行结果、测试套件、测试结果、状态计数器以及交给渲染器的聚合报告的模型。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::path::PathBuf;

/// The outcome of a single test case as reported by the upstream framework.
/// 上游框架报告的单个测试用例的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestState {
    /// The test passed. / 测试通过。
    Passed,
    /// The test failed. / 测试失败。
    Failed,
    /// The test was skipped or left pending. / 测试被跳过或处于待定状态。
    Skipped,
}

impl TestState {
    /// Maps a raw state string onto a `TestState`.
    /// Anything that is neither `passed` nor `failed` (`pending`, `skipped`, unknown
    /// values, or no value at all) is treated as skipped.
    ///
    /// 将原始状态字符串映射为 `TestState`。
    /// 既不是 `passed` 也不是 `failed` 的任何值都被视为跳过。
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("passed") => TestState::Passed,
            Some("failed") => TestState::Failed,
            _ => TestState::Skipped,
        }
    }

    /// The glyph shown next to the test in reports.
    pub fn glyph(&self) -> &'static str {
        match self {
            TestState::Passed => "✓",
            TestState::Failed => "✗",
            TestState::Skipped => "○",
        }
    }

    /// Gets the CSS class used for the status badge.
    pub fn css_class(&self) -> &'static str {
        match self {
            TestState::Passed => "passed",
            TestState::Failed => "failed",
            TestState::Skipped => "pending",
        }
    }
}

impl fmt::Display for TestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TestState::Passed => "passed",
            TestState::Failed => "failed",
            TestState::Skipped => "skipped",
        };
        f.write_str(s)
    }
}

/// Error details attached to a test. The message itself may be missing.
/// 附加到测试上的错误详情。消息本身可能缺失。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestError {
    pub message: Option<String>,
}

/// One test case outcome.
/// 单个测试用例的结果。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Test {
    /// Test title as reported upstream. / 上游报告的测试标题。
    pub name: String,
    /// Final state of the test. / 测试的最终状态。
    pub state: TestState,
    /// Duration in milliseconds, `0` when the upstream file omits it.
    /// 以毫秒为单位的持续时间，上游文件省略时为 `0`。
    pub duration_ms: u64,
    /// Present only when the upstream framework recorded an error.
    /// 仅当上游框架记录了错误时才存在。
    pub error: Option<TestError>,
}

/// A named group of tests within one run.
/// 一次运行中的一组命名测试。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suite {
    pub name: String,
    pub tests: Vec<Test>,
    /// Whether the upstream document listed a `tests` array at all.
    /// A suite without one is never treated as a parent of the next suite.
    ///
    /// 上游文档是否列出了 `tests` 数组。没有该数组的套件永远不会被视为下一个套件的父套件。
    #[serde(skip, default = "listed")]
    pub tests_listed: bool,
    /// Every other attribute the upstream document carried for this suite
    /// (`duration`, `start`, `end`, ...). Preserved verbatim through normalization.
    ///
    /// 上游文档为此套件携带的所有其他属性，在规范化过程中原样保留。
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl Suite {
    /// Creates a suite with no extra attributes.
    pub fn new(name: impl Into<String>, tests: Vec<Test>) -> Self {
        Self {
            name: name.into(),
            tests,
            tests_listed: true,
            extra: Map::new(),
        }
    }

    /// Creates a suite whose source had no `tests` field.
    pub fn unlisted(name: impl Into<String>) -> Self {
        Self {
            tests_listed: false,
            ..Self::new(name, Vec::new())
        }
    }

    /// Checks if the suite carries no tests.
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// An explicitly empty `tests` array marks a parent of nested suites.
    pub fn is_empty_parent(&self) -> bool {
        self.tests_listed && self.tests.is_empty()
    }

    /// Number of failed tests in this suite.
    pub fn failed_count(&self) -> usize {
        self.tests
            .iter()
            .filter(|t| t.state == TestState::Failed)
            .count()
    }
}

fn listed() -> bool {
    true
}

/// Additive pass/fail/skip triple.
/// Counts are trusted as reported by each run and are never recomputed from the test list.
///
/// 可累加的 通过/失败/跳过 三元组。
/// 计数按每次运行的报告值采信，从不根据测试列表重新计算。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateCounts {
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
}

impl StateCounts {
    pub fn new(passed: u64, failed: u64, skipped: u64) -> Self {
        Self {
            passed,
            failed,
            skipped,
        }
    }

    /// `passed + failed + skipped`, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.passed
            .saturating_add(self.failed)
            .saturating_add(self.skipped)
    }

    /// Percentage of passed tests, `0.0` when there are no tests at all.
    /// 通过测试的百分比，没有任何测试时为 `0.0`。
    pub fn pass_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.passed as f64 / total as f64 * 100.0
        }
    }

    /// The pass rate rounded to one decimal place, e.g. `"66.7"`.
    pub fn pass_rate_display(&self) -> String {
        format!("{:.1}", self.pass_rate())
    }
}

impl Add for StateCounts {
    type Output = StateCounts;

    // Counts come straight from input files, so sums saturate instead of overflowing.
    fn add(self, rhs: StateCounts) -> StateCounts {
        StateCounts {
            passed: self.passed.saturating_add(rhs.passed),
            failed: self.failed.saturating_add(rhs.failed),
            skipped: self.skipped.saturating_add(rhs.skipped),
        }
    }
}

impl AddAssign for StateCounts {
    fn add_assign(&mut self, rhs: StateCounts) {
        *self = *self + rhs;
    }
}

impl Sum for StateCounts {
    fn sum<I: Iterator<Item = StateCounts>>(iter: I) -> Self {
        iter.fold(StateCounts::default(), Add::add)
    }
}

impl<'a> Sum<&'a StateCounts> for StateCounts {
    fn sum<I: Iterator<Item = &'a StateCounts>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// One parsed per-shard result file.
/// 一个已解析的分片结果文件。
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// The file this run was read from. / 读取此运行结果的文件。
    pub source: PathBuf,
    /// Suites in the order the upstream file listed them. / 按上游文件列出顺序排列的套件。
    pub suites: Vec<Suite>,
    /// Counters exactly as the run reported them. / 运行报告的原始计数。
    pub state: StateCounts,
}

/// The cross-run union of normalized suites plus the summed counters.
/// This is the only input the renderers see.
///
/// 跨运行的规范化套件合集以及累加后的计数器。
/// 这是渲染器看到的唯一输入。
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AggregatedReport {
    pub suites: Vec<Suite>,
    pub state: StateCounts,
}

impl AggregatedReport {
    /// Total number of tests according to the summed counters.
    pub fn total_tests(&self) -> u64 {
        self.state.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_states_are_treated_as_skipped() {
        assert_eq!(TestState::from_raw(Some("passed")), TestState::Passed);
        assert_eq!(TestState::from_raw(Some("failed")), TestState::Failed);
        assert_eq!(TestState::from_raw(Some("pending")), TestState::Skipped);
        assert_eq!(TestState::from_raw(Some("skipped")), TestState::Skipped);
        assert_eq!(TestState::from_raw(None), TestState::Skipped);
    }

    #[test]
    fn pass_rate_is_zero_without_tests() {
        let counts = StateCounts::default();
        assert_eq!(counts.pass_rate(), 0.0);
        assert_eq!(counts.pass_rate_display(), "0.0");
    }

    #[test]
    fn pass_rate_rounds_to_one_decimal() {
        let counts = StateCounts::new(2, 1, 0);
        assert_eq!(counts.pass_rate_display(), "66.7");
        assert_eq!(StateCounts::new(1, 0, 0).pass_rate_display(), "100.0");
    }

    #[test]
    fn counts_sum_element_wise() {
        let runs = [StateCounts::new(1, 2, 3), StateCounts::new(10, 20, 30)];
        let total: StateCounts = runs.iter().sum();
        assert_eq!(total, StateCounts::new(11, 22, 33));
        assert_eq!(total.total(), 66);
    }

    #[test]
    fn huge_counts_saturate_instead_of_overflowing() {
        let mut counts = StateCounts::new(u64::MAX, 0, 0);
        counts += StateCounts::new(1, 2, 0);
        assert_eq!(counts, StateCounts::new(u64::MAX, 2, 0));
        assert_eq!(counts.total(), u64::MAX);
        assert!((0.0..=100.0).contains(&counts.pass_rate()));

        let summed: StateCounts = [StateCounts::new(0, 0, u64::MAX), StateCounts::new(0, 0, 7)]
            .iter()
            .sum();
        assert_eq!(summed.skipped, u64::MAX);
    }

    #[test]
    fn only_listed_empty_suites_are_parents() {
        assert!(Suite::new("Parent", vec![]).is_empty_parent());
        let unlisted = Suite::unlisted("Bare");
        assert!(unlisted.is_empty());
        assert!(!unlisted.is_empty_parent());
    }
}
