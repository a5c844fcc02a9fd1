//! # Result Aggregator Module / 结果聚合模块
//!
//! Merges the normalized suites of every run into one ordered collection and sums the
//! pass/fail/skip counters. Runs keep their discovery order, suites keep their order
//! within a run, and identically named suites from different shards are all kept.
//!
//! 将所有运行的规范化套件合并为一个有序集合，并累加 通过/失败/跳过 计数器。
//! 运行保持发现顺序，套件在运行内保持原有顺序，不同分片中同名的套件全部保留。

use std::path::PathBuf;
use tracing::{info, warn};

use crate::core::models::{AggregatedReport, RunResult, StateCounts};
use crate::core::normalizer::{EmptyParentMerge, SuiteTransform};

/// An empty suite that normalization dropped, kept for auditing.
/// 规范化过程中被丢弃的空套件，保留以供审计。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedSuite {
    pub source: PathBuf,
    pub name: String,
}

/// Diagnostics about one aggregation pass.
/// 单次聚合过程的诊断信息。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationStats {
    /// Number of runs merged. / 合并的运行数。
    pub runs: usize,
    /// Number of suites in the aggregate. / 聚合结果中的套件数。
    pub suites: usize,
    /// Suites removed by normalization. / 被规范化移除的套件。
    pub dropped: Vec<DroppedSuite>,
}

/// The aggregated report together with the diagnostics gathered while building it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub report: AggregatedReport,
    pub stats: AggregationStats,
}

/// Aggregates `runs` using the given suite transform.
///
/// Counters are summed from each run's reported `state`, independently of the suites
/// that survive normalization.
///
/// 使用给定的套件转换聚合 `runs`。计数器根据每次运行报告的 `state` 累加，
/// 与规范化后保留的套件无关。
pub fn aggregate_with(runs: &[RunResult], transform: &dyn SuiteTransform) -> Aggregation {
    let mut report = AggregatedReport::default();
    let mut stats = AggregationStats {
        runs: runs.len(),
        ..AggregationStats::default()
    };

    for run in runs {
        let normalized = transform.apply(&run.suites);

        for name in normalized.dropped {
            warn!(
                file = %run.source.display(),
                suite = %name,
                "dropping empty suite with no populated successor"
            );
            stats.dropped.push(DroppedSuite {
                source: run.source.clone(),
                name,
            });
        }

        report.suites.extend(normalized.suites);
        report.state += run.state;
    }

    stats.suites = report.suites.len();
    info!(runs = stats.runs, suites = stats.suites, "combined test suites");
    info!(
        passed = report.state.passed,
        failed = report.state.failed,
        skipped = report.state.skipped,
        "aggregated totals"
    );

    Aggregation { report, stats }
}

/// Aggregates `runs` with the default [`EmptyParentMerge`] normalization.
/// 使用默认的 [`EmptyParentMerge`] 规范化聚合 `runs`。
pub fn aggregate(runs: &[RunResult]) -> Aggregation {
    aggregate_with(runs, &EmptyParentMerge)
}

/// Sums the counters of `runs` without touching their suites.
pub fn sum_counts(runs: &[RunResult]) -> StateCounts {
    runs.iter().map(|run| run.state).sum()
}
