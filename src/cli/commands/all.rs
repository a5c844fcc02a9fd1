//! # All Command Module / 全部命令模块
//!
//! Prepares the output directories, then runs rich, summary and list in order.
//! A failing rich report generator does not stop the summary.
//!
//! 准备输出目录，然后依次运行 rich、summary 和 list。富报告生成器失败不会阻止摘要生成。

use anyhow::Result;
use colored::*;
use tokio_util::sync::CancellationToken;

use super::{list, rich, summary};
use crate::{
    core::config::ReportConfig,
    infra::{fs::ensure_dir, t},
};

/// Executes the full pipeline.
pub async fn execute(config: &ReportConfig, cancel: &CancellationToken, locale: &str) -> Result<()> {
    println!("{}", t!("starting_generation", locale = locale).bold());

    ensure_dir(&config.results_dir)?;
    ensure_dir(&config.reports_dir)?;

    rich::execute(config, cancel, locale).await;
    summary::execute(config, locale)?;
    list::execute(config, locale);

    println!("\n{}", t!("generation_completed", locale = locale).green().bold());
    Ok(())
}
