//! # List Command Module / 列出命令模块

use colored::*;

use crate::{
    core::config::ReportConfig,
    infra::{
        publisher::{discover_reports, GeneratedReport, ReportKind},
        t,
    },
};

/// Prints a `file://` link for every generated report found on disk.
///
/// 为磁盘上找到的每个已生成报告打印 `file://` 链接。
pub fn execute(config: &ReportConfig, locale: &str) -> Vec<GeneratedReport> {
    let reports = discover_reports(config);

    if reports.is_empty() {
        println!(
            "{}",
            t!("list.none", locale = locale, path = config.reports_dir.display()).yellow()
        );
        return reports;
    }

    println!("\n{}", t!("list.header", locale = locale).bold());
    for report in &reports {
        let url = report.url.as_str();
        let line = match report.kind {
            ReportKind::Rich => t!("list.rich", locale = locale, url = url),
            ReportKind::Summary => t!("list.summary", locale = locale, url = url),
        };
        println!("{}", line);
    }

    reports
}
