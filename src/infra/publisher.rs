//! # Report Publisher Module / 报告发布模块
//!
//! Runs the external rich report generator over the raw results directory and finds
//! the report artifacts that already exist on disk.
//!
//! The generator is an out-of-process collaborator. It always runs under a timeout and
//! can be cancelled; every failure is returned as a [`PublishError`] for the caller to
//! log, and never aborts the rest of the pipeline.
//!
//! 在原始结果目录上运行外部富报告生成器，并查找磁盘上已存在的报告产物。
//! 生成器始终在超时限制下运行并可被取消；所有失败都以 [`PublishError`] 返回，由调用方记录，
//! 不会中止管道的其余部分。

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::core::config::ReportConfig;
use crate::infra::command::{build_command_line, spawn_and_capture, tail_lines};
use crate::infra::fs::file_url;

/// Number of output lines kept in a failure message.
const FAILURE_OUTPUT_LINES: usize = 20;

/// Why the rich report could not be generated.
/// 无法生成富报告的原因。
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("invalid generator command: {0}")]
    InvalidCommand(String),

    #[error("could not start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}\n{output}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        output: String,
    },

    #[error("generator did not finish within {}s", .0.as_secs())]
    TimedOut(Duration),

    #[error("generator was cancelled")]
    Cancelled,
}

/// Invokes the configured rich report generator.
/// 调用配置的富报告生成器。
#[derive(Debug, Clone)]
pub struct RichReportGenerator {
    command_template: String,
    input_dir: PathBuf,
    output_dir: PathBuf,
    timeout: Duration,
}

impl RichReportGenerator {
    pub fn new(
        command_template: impl Into<String>,
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self {
            command_template: command_template.into(),
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            timeout,
        }
    }

    /// Builds a generator from the shared configuration.
    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(
            config.generator_command.clone(),
            config.raw_results_dir.clone(),
            config.rich_report_dir(),
            config.generator_timeout(),
        )
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Entry page of the generated report.
    pub fn index_path(&self) -> PathBuf {
        self.output_dir.join("index.html")
    }

    /// Runs the generator and waits for it, up to the configured timeout.
    ///
    /// The child process is killed when the timeout elapses or `cancel` fires.
    ///
    /// 运行生成器并等待其完成，最长等待配置的超时时间。超时或 `cancel` 触发时子进程会被终止。
    pub async fn generate(&self, cancel: &CancellationToken) -> Result<PathBuf, PublishError> {
        let parts = build_command_line(&self.command_template, &self.input_dir, &self.output_dir)
            .map_err(|e| PublishError::InvalidCommand(e.to_string()))?;
        let program = parts[0].clone();

        let mut cmd = tokio::process::Command::new(&program);
        cmd.args(&parts[1..]).kill_on_drop(true);

        debug!(command = %parts.join(" "), "starting rich report generator");

        let run = tokio::time::timeout(self.timeout, spawn_and_capture(cmd));
        let (status, output) = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PublishError::Cancelled),
            finished = run => match finished {
                Ok(result) => result,
                Err(_) => return Err(PublishError::TimedOut(self.timeout)),
            },
        };

        let status = status.map_err(|source| PublishError::Spawn {
            program: program.clone(),
            source,
        })?;

        if !output.trim().is_empty() {
            debug!(output = %output.trim(), "generator output");
        }

        if status.success() {
            info!(output = %self.output_dir.display(), "rich report generated");
            Ok(self.index_path())
        } else {
            Err(PublishError::Failed {
                program,
                status,
                output: tail_lines(&output, FAILURE_OUTPUT_LINES),
            })
        }
    }
}

/// The kinds of report this tool knows how to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Rich,
    Summary,
}

/// A report artifact present on disk.
/// 磁盘上存在的报告产物。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReport {
    pub kind: ReportKind,
    pub path: PathBuf,
    /// `file://` URL of the absolute path. / 绝对路径的 `file://` URL。
    pub url: String,
}

/// Lists the generated reports that currently exist, rich report first.
///
/// 列出当前存在的已生成报告，富报告在前。
pub fn discover_reports(config: &ReportConfig) -> Vec<GeneratedReport> {
    [
        (ReportKind::Rich, config.rich_report_index()),
        (ReportKind::Summary, config.summary_path()),
    ]
    .into_iter()
    .filter(|(_, path)| path.is_file())
    .map(|(kind, path)| GeneratedReport {
        kind,
        url: file_url(&path),
        path,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn config_in(root: &Path) -> ReportConfig {
        ReportConfig {
            reports_dir: root.join("reports"),
            raw_results_dir: root.join("raw"),
            ..ReportConfig::default()
        }
    }

    #[test]
    fn discovers_only_existing_reports() {
        let root = tempdir().unwrap();
        let config = config_in(root.path());
        assert!(discover_reports(&config).is_empty());

        fs::create_dir_all(&config.reports_dir).unwrap();
        fs::write(config.summary_path(), "<html></html>").unwrap();
        let found = discover_reports(&config);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, ReportKind::Summary);
        assert!(found[0].url.starts_with("file://"));

        fs::create_dir_all(config.rich_report_dir()).unwrap();
        fs::write(config.rich_report_index(), "<html></html>").unwrap();
        let kinds: Vec<_> = discover_reports(&config).iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![ReportKind::Rich, ReportKind::Summary]);
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let root = tempdir().unwrap();
        let generator = RichReportGenerator::new(
            "this_generator_definitely_does_not_exist_12345 {input} {output}",
            root.path().join("raw"),
            root.path().join("out"),
            Duration::from_secs(5),
        );

        let err = generator.generate(&CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, PublishError::Spawn { .. }), "{err}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_reported_with_output() {
        let root = tempdir().unwrap();
        let generator = RichReportGenerator::new(
            "sh -c 'echo generator broke; exit 3'",
            root.path().join("raw"),
            root.path().join("out"),
            Duration::from_secs(5),
        );

        let err = generator.generate(&CancellationToken::new()).await.unwrap_err();
        match err {
            PublishError::Failed { output, .. } => assert!(output.contains("generator broke")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_generator_times_out() {
        let root = tempdir().unwrap();
        let generator = RichReportGenerator::new(
            "sleep 5",
            root.path().join("raw"),
            root.path().join("out"),
            Duration::from_millis(100),
        );

        let err = generator.generate(&CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, PublishError::TimedOut(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn cancelled_generator_stops() {
        let root = tempdir().unwrap();
        let generator = RichReportGenerator::new(
            "sleep 5",
            root.path().join("raw"),
            root.path().join("out"),
            Duration::from_secs(30),
        );
        let token = CancellationToken::new();
        token.cancel();

        let err = generator.generate(&token).await.unwrap_err();
        assert!(matches!(err, PublishError::Cancelled));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn successful_generator_returns_index_path() {
        let root = tempdir().unwrap();
        let generator = RichReportGenerator::new(
            "true {input} {output}",
            root.path().join("raw"),
            root.path().join("out"),
            Duration::from_secs(5),
        );

        let index = generator.generate(&CancellationToken::new()).await.unwrap();
        assert_eq!(index, root.path().join("out").join("index.html"));
    }
}
