//! # Aggregation Integration Tests / 聚合集成测试
//!
//! Runs the loader and the aggregator together over result files written to disk.
//!
//! 在写入磁盘的结果文件上同时运行加载器和聚合器。

mod common;

use common::*;
use proptest::prelude::*;
use serde_json::json;
use shard_report::core::aggregator::{aggregate, sum_counts};
use shard_report::core::loader::{load_results, LoadError};
use shard_report::core::models::{RunResult, StateCounts, TestState};
use std::path::PathBuf;

#[test]
fn unreadable_file_is_skipped_and_the_rest_aggregated() {
    let env = setup_test_environment();
    let dir = env.path().join("test-results");

    write_result(
        &dir,
        "results-a.json",
        &run_document(
            vec![suite(
                "Login",
                vec![test_record("valid", "passed", 10.0), failed_record("invalid", "boom")],
            )],
            1,
            1,
            0,
        ),
    );
    write_raw_result(&dir, "results-b.json", "{ not json");

    let outcome = load_results(&dir, "results-").unwrap();
    assert_eq!(outcome.attempted, 2);
    assert_eq!(outcome.runs.len(), 1);
    assert_eq!(outcome.failed(), 1);
    assert!(matches!(outcome.failures[0], LoadError::Parse { .. }));
    assert!(outcome.failures[0].path().ends_with("results-b.json"));

    let aggregation = aggregate(&outcome.runs);
    assert_eq!(aggregation.report.state, StateCounts::new(1, 1, 0));
    assert_eq!(aggregation.report.suites.len(), 1);
    assert_eq!(aggregation.report.suites[0].failed_count(), 1);
}

#[test]
fn files_without_the_prefix_are_ignored() {
    let env = setup_test_environment();
    let dir = env.path().join("test-results");

    write_result(&dir, "results-1.json", &run_document(vec![], 1, 0, 0));
    write_result(&dir, "coverage.json", &run_document(vec![], 50, 0, 0));
    write_raw_result(&dir, "results-2.txt", "ignored");

    let outcome = load_results(&dir, "results-").unwrap();
    assert_eq!(outcome.attempted, 1);
    assert_eq!(sum_counts(&outcome.runs), StateCounts::new(1, 0, 0));
}

#[test]
fn missing_results_directory_yields_nothing() {
    let env = setup_test_environment();
    let outcome = load_results(&env.path().join("nowhere"), "results-").unwrap();
    assert_eq!(outcome.attempted, 0);
    assert!(outcome.runs.is_empty());
}

#[test]
fn nested_suites_are_merged_and_order_is_preserved() {
    let env = setup_test_environment();
    let dir = env.path().join("test-results");

    write_result(
        &dir,
        "results-1.json",
        &run_document(
            vec![
                suite("X", vec![test_record("x1", "passed", 1.0)]),
                suite("Checkout", vec![]),
                suite("guest", vec![test_record("g1", "passed", 2.0)]),
            ],
            2,
            0,
            0,
        ),
    );
    write_result(
        &dir,
        "results-2.json",
        &run_document(
            vec![
                suite("Y", vec![test_record("y1", "pending", 0.0)]),
                suite("Orphan", vec![]),
            ],
            0,
            0,
            1,
        ),
    );
    write_result(
        &dir,
        "results-3.json",
        &run_document(vec![suite("Z", vec![test_record("z1", "passed", 3.0)])], 1, 0, 0),
    );

    let outcome = load_results(&dir, "results-").unwrap();
    let aggregation = aggregate(&outcome.runs);

    let names: Vec<_> = aggregation
        .report
        .suites
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["X", "Checkout - guest", "Y", "Z"]);
    assert_eq!(aggregation.report.suites[2].tests[0].state, TestState::Skipped);
    assert_eq!(aggregation.report.state, StateCounts::new(3, 0, 1));
    assert_eq!(aggregation.stats.dropped.len(), 1);
    assert_eq!(aggregation.stats.dropped[0].name, "Orphan");
}

#[test]
fn suite_without_tests_field_keeps_next_suite_name() {
    let env = setup_test_environment();
    let dir = env.path().join("test-results");

    write_result(
        &dir,
        "results-1.json",
        &json!({
            "suites": [
                { "name": "P" },
                { "name": "C", "tests": [test_record("c1", "passed", 4.0)] },
                { "name": "Parent", "tests": [] },
                { "name": "child", "tests": [test_record("c2", "passed", 4.0)] }
            ],
            "state": { "passed": 2 }
        }),
    );

    let outcome = load_results(&dir, "results-").unwrap();
    let aggregation = aggregate(&outcome.runs);

    let names: Vec<_> = aggregation
        .report
        .suites
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["C", "Parent - child"]);
    assert_eq!(aggregation.stats.dropped[0].name, "P");
}

#[test]
fn huge_counters_from_files_do_not_overflow() {
    let env = setup_test_environment();
    let dir = env.path().join("test-results");

    write_result(&dir, "results-1.json", &run_document(vec![], u64::MAX, 0, 0));
    write_result(&dir, "results-2.json", &run_document(vec![], 1, 1, 0));

    let outcome = load_results(&dir, "results-").unwrap();
    let state = aggregate(&outcome.runs).report.state;
    assert_eq!(state, StateCounts::new(u64::MAX, 1, 0));
    assert_eq!(state.total(), u64::MAX);
}

#[test]
fn identically_named_suites_from_different_shards_are_kept() {
    let env = setup_test_environment();
    let dir = env.path().join("test-results");

    for shard in 1..=2 {
        write_result(
            &dir,
            &format!("results-{shard}.json"),
            &run_document(vec![suite("Login", vec![test_record("ok", "passed", 5.0)])], 1, 0, 0),
        );
    }

    let outcome = load_results(&dir, "results-").unwrap();
    let aggregation = aggregate(&outcome.runs);
    assert_eq!(aggregation.report.suites.len(), 2);
    assert_eq!(aggregation.report.state.passed, 2);
}

fn counts_strategy() -> impl Strategy<Value = StateCounts> {
    (0u64..10_000, 0u64..10_000, 0u64..10_000).prop_map(|(p, f, s)| StateCounts::new(p, f, s))
}

fn runs_from(counts: &[StateCounts]) -> Vec<RunResult> {
    counts
        .iter()
        .enumerate()
        .map(|(i, state)| RunResult {
            source: PathBuf::from(format!("results-{i}.json")),
            suites: vec![],
            state: *state,
        })
        .collect()
}

proptest! {
    #[test]
    fn counters_add_up_regardless_of_run_order(
        counts in prop::collection::vec(counts_strategy(), 0..12),
        seed in any::<u64>(),
    ) {
        let expected = StateCounts::new(
            counts.iter().map(|c| c.passed).sum(),
            counts.iter().map(|c| c.failed).sum(),
            counts.iter().map(|c| c.skipped).sum(),
        );

        let mut shuffled = counts.clone();
        if !shuffled.is_empty() {
            let len = shuffled.len();
            shuffled.rotate_left((seed as usize) % len);
            shuffled.reverse();
        }

        prop_assert_eq!(aggregate(&runs_from(&counts)).report.state, expected);
        prop_assert_eq!(aggregate(&runs_from(&shuffled)).report.state, expected);
    }

    #[test]
    fn pass_rate_stays_within_bounds(counts in counts_strategy()) {
        let rate = counts.pass_rate();
        prop_assert!((0.0..=100.0).contains(&rate));
        if counts.total() == 0 {
            prop_assert_eq!(counts.pass_rate_display(), "0.0");
        }
    }
}
