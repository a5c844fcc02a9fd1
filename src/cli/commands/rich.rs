//! # Rich Report Command Module / 富报告命令模块
//!
//! Runs the external rich report generator. Failures are reported but never fatal.
//!
//! 运行外部富报告生成器。失败会被报告，但不会导致整体失败。

use colored::*;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::{
    core::config::ReportConfig,
    infra::{publisher::RichReportGenerator, t},
};

/// Executes the rich action.
///
/// Returns the index page of the generated report, or `None` if generation failed.
pub async fn execute(
    config: &ReportConfig,
    cancel: &CancellationToken,
    locale: &str,
) -> Option<PathBuf> {
    println!("{}", t!("rich.generating", locale = locale).cyan());

    let generator = RichReportGenerator::from_config(config);
    match generator.generate(cancel).await {
        Ok(index) => {
            println!("{}", t!("rich.success", locale = locale).green());
            println!(
                "{}",
                t!("rich.location", locale = locale, path = generator.output_dir().display())
            );
            Some(index)
        }
        Err(e) => {
            error!(error = %e, "rich report generation failed");
            let message = e.to_string();
            eprintln!(
                "{}",
                t!("rich.failed", locale = locale, error = message).red()
            );
            None
        }
    }
}
