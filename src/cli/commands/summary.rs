//! # Summary Command Module / 摘要命令模块
//!
//! Loads the shard result files, aggregates them and writes the static HTML summary.
//!
//! 加载分片结果文件，聚合后写出静态 HTML 摘要。

use anyhow::{Context, Result};
use chrono::Local;
use colored::*;
use std::path::PathBuf;

use crate::{
    core::{aggregator::aggregate, config::ReportConfig, loader::load_results},
    infra::{fs::absolute_path, t},
    reporting::{generate_html_report, print_aggregation, print_load_outcome, print_summary, RenderOptions},
};

/// Executes the summary action.
///
/// # Returns
/// The path of the written summary, or `None` when no result files were found and
/// nothing was written.
///
/// # Errors
/// Fails when the results directory cannot be listed or the summary cannot be written.
/// Unreadable individual result files are reported and skipped.
pub fn execute(config: &ReportConfig, locale: &str) -> Result<Option<PathBuf>> {
    println!("{}", t!("summary.generating", locale = locale).cyan());

    let results_dir = &config.results_dir;
    let outcome = load_results(results_dir, &config.result_prefix)
        .with_context(|| format!("Failed to list result files in {}", results_dir.display()))?;

    if outcome.attempted == 0 {
        println!(
            "{}",
            t!("summary.no_results", locale = locale, path = results_dir.display()).yellow()
        );
        return Ok(None);
    }

    print_load_outcome(&outcome, locale);

    let aggregation = aggregate(&outcome.runs);
    print_aggregation(&aggregation, locale);
    print_summary(&aggregation.report, locale);

    let output_path = config.summary_path();
    let options = RenderOptions {
        locale: locale.to_string(),
        title: config.title.clone(),
    };
    generate_html_report(
        &aggregation.report,
        &output_path,
        Local::now().naive_local(),
        &options,
    )?;

    let shown = absolute_path(&output_path).unwrap_or_else(|_| output_path.clone());
    println!("{}", t!("summary.success", locale = locale).green());
    println!(
        "{}",
        t!("summary.location", locale = locale, path = shown.display())
    );

    Ok(Some(output_path))
}
