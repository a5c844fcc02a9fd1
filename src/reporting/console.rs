//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints the operator-facing diagnostics of a summary run: how many files
//! were combined, which were skipped, which suites were dropped, the totals and a
//! per-suite table. Skipped files and dropped suites are always listed so that
//! differences between raw shard counts and rendered totals can be audited.
//!
//! 此模块打印摘要运行中面向操作员的诊断信息：合并了多少文件、跳过了哪些文件、
//! 丢弃了哪些套件、总计以及每个套件的表格。跳过的文件和丢弃的套件总会被列出，
//! 以便审计原始分片计数与渲染总数之间的差异。

use colored::*;

use crate::core::aggregator::Aggregation;
use crate::core::loader::LoadOutcome;
use crate::core::models::AggregatedReport;
use crate::infra::t;

/// Prints which files were combined and which had to be skipped.
///
/// # Output Format / 输出格式
/// ```text
/// 📊 Combining results from 3 test files...
/// ⚠️  Skipped 1 unreadable result file(s):
///    - test-results/results-b.json: could not parse ...
/// ```
pub fn print_load_outcome(outcome: &LoadOutcome, locale: &str) {
    println!(
        "{}",
        t!("summary.combining", locale = locale, count = outcome.attempted)
    );

    if outcome.failures.is_empty() {
        return;
    }

    println!(
        "{}",
        t!("summary.skipped_files", locale = locale, count = outcome.failed()).yellow()
    );
    for failure in &outcome.failures {
        let file = failure.path().display().to_string();
        let reason = failure.to_string();
        println!(
            "{}",
            t!("summary.skipped_file", locale = locale, file = file, reason = reason).yellow()
        );
    }
}

/// Prints the result of aggregation: dropped suites, suite count and totals.
pub fn print_aggregation(aggregation: &Aggregation, locale: &str) {
    let stats = &aggregation.stats;
    let state = &aggregation.report.state;

    if !stats.dropped.is_empty() {
        println!(
            "{}",
            t!("summary.dropped_suites", locale = locale, count = stats.dropped.len()).yellow()
        );
        for dropped in &stats.dropped {
            let file = dropped.source.display().to_string();
            println!(
                "{}",
                t!("summary.dropped_suite", locale = locale, suite = dropped.name.as_str(), file = file)
                    .yellow()
            );
        }
    }

    println!(
        "{}",
        t!("summary.combined", locale = locale, count = stats.suites).green()
    );
    println!(
        "{}",
        t!(
            "summary.totals",
            locale = locale,
            passed = state.passed,
            failed = state.failed,
            skipped = state.skipped
        )
    );
}

/// Prints a table with one line per aggregated suite.
///
/// # Output Format / 输出格式
/// ```text
/// --- Suite Summary ---
///   - Login - valid credentials                | tests:   4 | failed:   0
///   - Dashboard                                | tests:  12 | failed:   2
/// ```
pub fn print_summary(report: &AggregatedReport, locale: &str) {
    if report.suites.is_empty() {
        return;
    }

    println!("\n{}", t!("summary.banner", locale = locale).bold());
    for suite in &report.suites {
        let failed = suite.failed_count();
        let failed_str = format!("failed: {:>3}", failed);
        let failed_colored = if failed > 0 {
            failed_str.red()
        } else {
            failed_str.green()
        };
        println!(
            "  - {:<42} | tests: {:>3} | {}",
            suite.name,
            suite.tests.len(),
            failed_colored
        );
    }
    println!();
}
