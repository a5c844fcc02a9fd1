//! # HTML Reporting Module / HTML 报告模块
//!
//! This module renders the aggregated report as a single static HTML document:
//! a header with the generation time, the overall pass rate, four summary tiles and
//! one block per suite listing its tests, durations and error excerpts.
//!
//! Every number is computed at render time and the page carries no script.
//! All names and messages go through maud, which escapes them.
//!
//! 此模块将聚合报告渲染为单个静态 HTML 文档：
//! 包含生成时间的页眉、总体通过率、四个摘要卡片，以及每个套件一个列出其测试、耗时和错误摘录的区块。
//! 所有数字在渲染时计算，页面不包含脚本。所有名称和消息都经过 maud 转义。

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::fs;
use std::path::Path;

use crate::core::models::{AggregatedReport, Suite, Test};
use crate::infra::fs::ensure_dir;
use crate::infra::t;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = include_str!("assets/report.css");

/// Timestamp format used in the report header.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Presentation settings for the HTML summary.
/// HTML 摘要的展示设置。
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Locale for labels. / 标签使用的语言环境。
    pub locale: String,
    /// Overrides the localized default title when set. / 设置时覆盖本地化的默认标题。
    pub title: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            title: None,
        }
    }
}

/// Renders `report` as a complete HTML document.
///
/// This is a pure function: the same report, options and timestamp always produce the
/// same bytes.
///
/// 将 `report` 渲染为完整的 HTML 文档。这是一个纯函数：相同的报告、选项和时间戳总是产生相同的字节。
pub fn render_html(
    report: &AggregatedReport,
    generated_at: NaiveDateTime,
    options: &RenderOptions,
) -> String {
    let locale = options.locale.as_str();
    let title = options
        .title
        .clone()
        .unwrap_or_else(|| t!("html_report.title", locale = locale).to_string());
    let state = &report.state;
    let timestamp = generated_at.format(TIMESTAMP_FORMAT).to_string();
    let rate = state.pass_rate_display();
    let subtitle = t!("html_report.subtitle", locale = locale, time = timestamp).to_string();
    let pass_rate = t!("html_report.pass_rate", locale = locale, rate = rate).to_string();
    let total_label = t!("html_report.summary.total", locale = locale).to_string();
    let passed_label = t!("html_report.summary.passed", locale = locale).to_string();
    let failed_label = t!("html_report.summary.failed", locale = locale).to_string();
    let skipped_label = t!("html_report.summary.skipped", locale = locale).to_string();
    let no_suites = t!("html_report.no_suites", locale = locale).to_string();
    let footer = t!("html_report.footer", locale = locale).to_string();
    let no_error_details = t!("html_report.no_error_details", locale = locale).to_string();

    let markup = html! {
        (DOCTYPE)
        html lang=(locale) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(HTML_STYLE)) }
            }
            body {
                div class="container" {
                    div class="header" {
                        h1 { "🚀 " (title) }
                        p { (subtitle) }
                    }
                    div class="pass-rate" {
                        h2 { (pass_rate) }
                    }
                    div class="stats-grid" {
                        (stat_card("stat-card", state.total(), &total_label))
                        (stat_card("stat-card passed", state.passed, &passed_label))
                        (stat_card("stat-card failed", state.failed, &failed_label))
                        (stat_card("stat-card pending", state.skipped, &skipped_label))
                    }
                    div class="suites" {
                        @if report.suites.is_empty() {
                            p class="empty-note" { (no_suites) }
                        }
                        @for suite in &report.suites {
                            (suite_block(suite, &no_error_details))
                        }
                    }
                    div class="footer" {
                        p { (footer) }
                    }
                }
            }
        }
    };

    markup.into_string()
}

fn stat_card(class: &str, count: u64, label: &str) -> Markup {
    html! {
        div class=(class) {
            h3 { (count) }
            p { (label) }
        }
    }
}

fn suite_block(suite: &Suite, no_error_details: &str) -> Markup {
    html! {
        div class="suite" {
            div class="suite-header" { "📋 " (suite.name) }
            div class="suite-content" {
                @for test in &suite.tests {
                    (test_item(test, no_error_details))
                }
            }
        }
    }
}

fn test_item(test: &Test, no_error_details: &str) -> Markup {
    html! {
        div class="test-item" {
            div class={ "test-status " (test.state.css_class()) } { (test.state.glyph()) }
            div class="test-title" { (test.name) }
            div class="test-duration" { (test.duration_ms) "ms" }
        }
        @if let Some(error) = &test.error {
            div class="error-details" {
                (error.message.as_deref().unwrap_or(no_error_details))
            }
        }
    }
}

/// Renders `report` and writes it to `output_path`, creating the parent directory
/// when it is missing.
///
/// # Errors
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The output file cannot be written to the specified path
///
/// 渲染 `report` 并写入 `output_path`，父目录不存在时会创建。
/// 父目录无法创建或输出文件无法写入时返回错误。
pub fn generate_html_report(
    report: &AggregatedReport,
    output_path: &Path,
    generated_at: NaiveDateTime,
    options: &RenderOptions,
) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    let html = render_html(report, generated_at, options);
    fs::write(output_path, html).with_context(|| {
        t!(
            "summary.write_failed",
            locale = options.locale.as_str(),
            path = output_path.display()
        )
        .to_string()
    })?;
    Ok(())
}
