//! # Configuration Module / 配置模块
//!
//! Loads the optional `ShardReport.toml` file and exposes the paths and settings
//! every component receives explicitly at construction.
//!
//! 加载可选的 `ShardReport.toml` 文件，并提供每个组件在构造时显式接收的路径和设置。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The default configuration file name looked up in the working directory.
/// 在工作目录中查找的默认配置文件名。
pub const DEFAULT_CONFIG_FILE: &str = "ShardReport.toml";

/// Sub-directory of the reports directory that receives the rich report.
/// 报告目录中接收富报告的子目录。
pub const RICH_REPORT_DIR: &str = "allure-report";

/// Settings shared by the loader, the renderer and the publisher.
/// Every field has a default, so an empty file (or no file) is a valid configuration.
///
/// 加载器、渲染器和发布器共享的设置。
/// 每个字段都有默认值，因此空文件（或没有文件）也是有效配置。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReportConfig {
    /// The language for console messages and report labels (e.g., "en", "zh-CN").
    /// The system locale is used when unset.
    ///
    /// 控制台消息和报告标签的语言（例如 "en", "zh-CN"）。未设置时使用系统语言。
    #[serde(default)]
    pub language: Option<String>,

    /// Directory holding the per-shard `results-*.json` files.
    /// 存放分片 `results-*.json` 文件的目录。
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Directory receiving every generated report.
    /// 接收所有生成报告的目录。
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,

    /// Raw results consumed by the external rich report generator.
    /// 外部富报告生成器使用的原始结果。
    #[serde(default = "default_raw_results_dir")]
    pub raw_results_dir: PathBuf,

    /// File name prefix identifying per-run result files.
    /// 标识每次运行结果文件的文件名前缀。
    #[serde(default = "default_result_prefix")]
    pub result_prefix: String,

    /// File name of the HTML summary inside `reports_dir`.
    #[serde(default = "default_summary_file")]
    pub summary_file: String,

    /// Title shown in the summary header. The localized "Test Report" is used when unset.
    #[serde(default)]
    pub title: Option<String>,

    /// Command template for the rich report generator.
    /// `{input}` and `{output}` are substituted before the command is split.
    ///
    /// 富报告生成器的命令模板。`{input}` 和 `{output}` 会在拆分命令之前被替换。
    #[serde(default = "default_generator_command")]
    pub generator_command: String,

    /// Upper bound on the generator's run time, in seconds.
    /// 生成器运行时间的上限（秒）。
    #[serde(default = "default_generator_timeout_secs")]
    pub generator_timeout_secs: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            language: None,
            results_dir: default_results_dir(),
            reports_dir: default_reports_dir(),
            raw_results_dir: default_raw_results_dir(),
            result_prefix: default_result_prefix(),
            summary_file: default_summary_file(),
            title: None,
            generator_command: default_generator_command(),
            generator_timeout_secs: default_generator_timeout_secs(),
        }
    }
}

impl ReportConfig {
    /// Full path of the HTML summary.
    pub fn summary_path(&self) -> PathBuf {
        self.reports_dir.join(&self.summary_file)
    }

    /// Output directory handed to the rich report generator.
    pub fn rich_report_dir(&self) -> PathBuf {
        self.reports_dir.join(RICH_REPORT_DIR)
    }

    /// Entry page of the rich report, once generated.
    pub fn rich_report_index(&self) -> PathBuf {
        self.rich_report_dir().join("index.html")
    }

    pub fn generator_timeout(&self) -> Duration {
        Duration::from_secs(self.generator_timeout_secs)
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("test-results")
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("test-reports")
}

fn default_raw_results_dir() -> PathBuf {
    PathBuf::from("allure-results")
}

fn default_result_prefix() -> String {
    "results-".to_string()
}

fn default_summary_file() -> String {
    "test-summary.html".to_string()
}

fn default_generator_command() -> String {
    "npx allure generate {input} --clean -o {output}".to_string()
}

fn default_generator_timeout_secs() -> u64 {
    300
}

/// Loads and parses a configuration file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid TOML.
///
/// 加载并解析配置文件。文件无法读取或不是有效 TOML 时返回错误。
pub fn load_config(path: &Path) -> Result<ReportConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolves the configuration to use.
///
/// An explicitly requested file must exist. Without one, `ShardReport.toml` in the
/// current directory is used when present, and the defaults otherwise.
///
/// 解析要使用的配置。显式指定的文件必须存在；未指定时，
/// 若当前目录存在 `ShardReport.toml` 则使用它，否则使用默认值。
pub fn resolve_config(explicit: Option<&Path>) -> Result<ReportConfig> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if fallback.is_file() {
                load_config(fallback)
            } else {
                Ok(ReportConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: ReportConfig = toml::from_str("").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.summary_path(), PathBuf::from("test-reports/test-summary.html"));
        assert_eq!(
            config.rich_report_index(),
            PathBuf::from("test-reports/allure-report/index.html")
        );
    }

    #[test]
    fn partial_document_overrides_only_given_keys() {
        let config: ReportConfig = toml::from_str(
            r#"
            language = "zh-CN"
            results_dir = "out/shards"
            generator_timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.language.as_deref(), Some("zh-CN"));
        assert_eq!(config.results_dir, PathBuf::from("out/shards"));
        assert_eq!(config.generator_timeout(), Duration::from_secs(5));
        assert_eq!(config.result_prefix, "results-");
        assert_eq!(config.reports_dir, PathBuf::from("test-reports"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = resolve_config(Some(Path::new("definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
