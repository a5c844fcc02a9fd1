//! # Reporting Module / 报告模块
//!
//! This module handles the generation and display of the aggregated test report.
//! It provides the static HTML summary renderer and colorful, formatted console
//! diagnostics with internationalization support.
//!
//! 此模块处理聚合测试报告的生成和显示。
//! 它提供静态 HTML 摘要渲染器以及支持国际化的彩色格式化控制台诊断输出。

pub mod console;
pub mod html;

// Re-export common reporting functions
pub use console::{print_aggregation, print_load_outcome, print_summary};
pub use html::{generate_html_report, render_html, RenderOptions};
