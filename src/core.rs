//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Shard Report:
//! loading per-shard result files, normalizing their suite trees and
//! aggregating them into a single report.
//!
//! 此模块包含 Shard Report 的核心功能：
//! 加载分片结果文件、规范化其套件树并将其聚合为单个报告。

pub mod aggregator;
pub mod config;
pub mod loader;
pub mod models;
pub mod normalizer;

// Re-exports
pub use aggregator::{aggregate, Aggregation};
pub use config::ReportConfig;
pub use loader::{load_results, LoadOutcome};
pub use models::{AggregatedReport, RunResult, StateCounts, Suite, Test, TestState};
pub use normalizer::{normalize_suites, EmptyParentMerge, SuiteTransform};
