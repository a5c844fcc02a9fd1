//! # Shard Report Library / Shard Report 库
//!
//! This library combines the per-shard JSON result files written by a sharded test run
//! into one aggregated report, renders it as a self-contained HTML summary and drives an
//! external rich report generator.
//!
//! 此库将分片测试运行写出的每个分片 JSON 结果文件合并为一个聚合报告，
//! 将其渲染为自包含的 HTML 摘要，并驱动外部富报告生成器。
//!
//! ## Modules / 模块
//!
//! - `core` - Result models, loading, suite normalization and aggregation
//! - `infra` - Infrastructure services like command execution, logging and file system operations
//! - `reporting` - HTML summary rendering and console output
//! - `cli` - Command-line interface and actions
//!
//! - `core` - 结果模型、加载、套件规范化与聚合
//! - `infra` - 基础设施服务，如命令执行、日志和文件系统操作
//! - `reporting` - HTML 摘要渲染和控制台输出
//! - `cli` - 命令行接口和操作

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::aggregator;
pub use core::config;
pub use core::models;

/// Resolves a requested locale against the bundled translations.
///
/// Tries the full locale first (e.g., "zh-CN"), then only the language part
/// (e.g., "en" from "en-US"), and finally falls back to "en".
///
/// 根据内置翻译解析请求的语言。先尝试完整语言标识，然后仅语言部分，最后回退到 "en"。
pub fn resolve_locale(requested: &str) -> String {
    let available = rust_i18n::available_locales!();
    let is_available = |candidate: &str| available.iter().any(|l| *l == candidate);

    if is_available(requested) {
        return requested.to_string();
    }

    requested
        .split(['-', '_'])
        .next()
        .filter(|lang| is_available(lang))
        .unwrap_or("en")
        .to_string()
}

/// Detects the system locale, "en" if it cannot be determined.
pub fn system_locale() -> String {
    sys_locale::get_locale().unwrap_or_else(|| "en".to_string())
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
