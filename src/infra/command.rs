//! # Command Execution Module / 命令执行模块
//!
//! Builds external commands from configurable templates and runs them while capturing
//! their combined output.
//!
//! 根据可配置的模板构建外部命令，并在运行时捕获其合并输出。

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

/// Expands a command template into program + arguments.
///
/// `{input}` and `{output}` are replaced by the given paths, environment variables and
/// `~` are expanded, and the result is split with shell quoting rules. Paths are
/// substituted quoted so that directories containing spaces survive the split.
///
/// 将命令模板展开为程序和参数。替换 `{input}` 和 `{output}`，展开环境变量和 `~`，
/// 并按 shell 引号规则拆分。
pub fn build_command_line(template: &str, input: &Path, output: &Path) -> Result<Vec<String>> {
    let input = shlex::try_quote(&input.to_string_lossy())
        .map(|q| q.into_owned())
        .map_err(|e| anyhow!("Failed to quote input path: {e}"))?;
    let output = shlex::try_quote(&output.to_string_lossy())
        .map(|q| q.into_owned())
        .map_err(|e| anyhow!("Failed to quote output path: {e}"))?;

    let expanded = shellexpand::full(template)
        .with_context(|| format!("Failed to expand command: {template}"))?
        .replace("{input}", &input)
        .replace("{output}", &output);

    let parts = shlex::split(&expanded)
        .ok_or_else(|| anyhow!("Failed to parse command: {}", expanded))?;

    if parts.is_empty() {
        return Err(anyhow!("Empty command after parsing."));
    }
    Ok(parts)
}

/// Spawns a command, captures its stdout and stderr.
/// The output streams are read concurrently and combined into a single string.
///
/// # Returns
/// A tuple containing:
/// - The `ExitStatus` of the process wrapped in an `io::Result`.
/// - The combined stdout and stderr as a `String`.
///
/// 派生一个命令，捕获其 stdout 和 stderr。
/// 输出流被并发读取并合并到一个字符串中。
pub async fn spawn_and_capture(
    mut cmd: tokio::process::Command,
) -> (std::io::Result<std::process::ExitStatus>, String) {
    let mut child = match cmd
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => return (Err(e), String::new()),
    };

    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return (
            Err(std::io::Error::other("failed to capture child output")),
            String::new(),
        );
    };

    let output = Arc::new(tokio::sync::Mutex::new(String::new()));

    let stdout_output = Arc::clone(&output);
    let stdout_handle = tokio::spawn(async move {
        let mut lines = BufReader::new(stdout).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let mut output = stdout_output.lock().await;
            output.push_str(&line);
            output.push('\n');
        }
    });

    let stderr_output = Arc::clone(&output);
    let stderr_handle = tokio::spawn(async move {
        let mut lines = BufReader::new(stderr).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let mut output = stderr_output.lock().await;
            output.push_str(&line);
            output.push('\n');
        }
    });

    let status = child.wait().await;

    // Drain both readers so no trailing output is lost.
    if let Err(e) = stdout_handle.await {
        warn!("failed to join stdout task: {}", e);
    }
    if let Err(e) = stderr_handle.await {
        warn!("failed to join stderr task: {}", e);
    }

    let captured = output.lock().await.clone();
    (status, captured)
}

/// Keeps the last `max_lines` lines of a captured output, for error messages.
pub fn tail_lines(output: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = output.lines().collect();
    let start = lines.len().saturating_sub(max_lines);
    lines[start..].join("\n")
}
