//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides utilities for file system operations,
//! such as creating report directories and turning paths into browsable URLs.
//!
//! 此模块提供文件系统操作的实用功能，
//! 如创建报告目录以及将路径转换为可浏览的 URL。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::infra::t;

/// Creates `dir` (and its parents) if it does not exist yet.
/// An existing directory is not an error.
///
/// 如果 `dir`（及其父目录）不存在则创建。目录已存在不视为错误。
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| t!("summary.create_dir_failed", path = dir.display()).to_string())
}

/// Gets the absolute path from a potentially relative path.
///
/// # Returns
/// Canonicalized absolute path, or an error if the path doesn't exist
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}

/// Formats an existing file as a `file://` URL of its absolute path.
/// Falls back to the path as given when it cannot be resolved.
///
/// 将现有文件格式化为其绝对路径的 `file://` URL。无法解析时回退为原始路径。
pub fn file_url(path: &Path) -> String {
    let resolved = absolute_path(path).unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", resolved.display())
}
