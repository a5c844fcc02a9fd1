//! # Command Line Interface / 命令行接口
//!
//! Builds the localized `clap` command, resolves the configuration and dispatches the
//! requested action.
//!
//! 构建本地化的 `clap` 命令，解析配置并分派请求的操作。

use anyhow::{bail, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::*;
use std::{env, fmt, path::PathBuf};
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::core::config::{resolve_config, ReportConfig};
use crate::infra::t;
use crate::{resolve_locale, system_locale};

pub mod commands;

/// The actions the tool can perform.
/// 工具可以执行的操作。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Run the external rich report generator.
    Rich,
    /// Aggregate the shard results and write the HTML summary.
    Summary,
    /// List the reports that exist on disk.
    List,
    /// Rich, summary, then list.
    All,
}

impl Action {
    /// Parses an action name. `allure` and `open` are accepted as aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "rich" | "allure" => Some(Action::Rich),
            "summary" => Some(Action::Summary),
            "list" | "open" => Some(Action::List),
            "all" => Some(Action::All),
            _ => None,
        }
    }

    /// Whether the action runs the external generator, the only step Ctrl-C can stop.
    pub fn runs_generator(&self) -> bool {
        matches!(self, Action::Rich | Action::All)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Rich => "rich",
            Action::Summary => "summary",
            Action::List => "list",
            Action::All => "all",
        };
        f.write_str(name)
    }
}

/// Turns the raw positional argument into an [`Action`].
///
/// A missing action means `all`. An unknown one falls back to `all` with a warning,
/// or is an error when `strict` is set.
///
/// 将原始位置参数转换为 [`Action`]。缺省为 `all`；未知操作会警告并回退到 `all`，
/// 在 `strict` 模式下则返回错误。
pub fn resolve_action(raw: Option<&str>, strict: bool, locale: &str) -> Result<Action> {
    let Some(raw) = raw else {
        return Ok(Action::All);
    };

    match Action::from_name(raw) {
        Some(action) => Ok(action),
        None if strict => bail!("{}", t!("unknown_action_strict", locale = locale, action = raw)),
        None => {
            println!(
                "{}",
                t!("unknown_action", locale = locale, action = raw).yellow()
            );
            Ok(Action::All)
        }
    }
}

/// Parsed command line arguments.
/// 解析后的命令行参数。
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub action: Option<String>,
    pub config: Option<PathBuf>,
    pub results_dir: Option<PathBuf>,
    pub reports_dir: Option<PathBuf>,
    pub raw_results_dir: Option<PathBuf>,
    pub lang: Option<String>,
    pub strict: bool,
    pub verbose: bool,
}

impl CliArgs {
    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            action: matches.get_one::<String>("action").cloned(),
            config: matches.get_one::<PathBuf>("config").cloned(),
            results_dir: matches.get_one::<PathBuf>("results-dir").cloned(),
            reports_dir: matches.get_one::<PathBuf>("reports-dir").cloned(),
            raw_results_dir: matches.get_one::<PathBuf>("raw-results-dir").cloned(),
            lang: matches.get_one::<String>("lang").cloned(),
            strict: matches.get_flag("strict"),
            verbose: matches.get_flag("verbose"),
        }
    }

    /// Applies the directory flags on top of the file configuration.
    pub fn apply_overrides(&self, config: &mut ReportConfig) {
        if let Some(dir) = &self.results_dir {
            config.results_dir = dir.clone();
        }
        if let Some(dir) = &self.reports_dir {
            config.reports_dir = dir.clone();
        }
        if let Some(dir) = &self.raw_results_dir {
            config.raw_results_dir = dir.clone();
        }
        if let Some(lang) = &self.lang {
            config.language = Some(lang.clone());
        }
    }
}

/// Pre-parses the command line arguments to find the language setting.
/// This allows the help texts to be localized before the full CLI is built.
fn pre_parse_language() -> String {
    let args: Vec<String> = env::args().collect();
    for (pos, arg) in args.iter().enumerate() {
        if let Some(lang) = arg.strip_prefix("--lang=") {
            return lang.to_string();
        }
        if arg == "--lang" {
            if let Some(lang) = args.get(pos + 1) {
                return lang.clone();
            }
        }
    }
    system_locale()
}

fn path_arg(id: &'static str, help: String) -> Arg {
    Arg::new(id)
        .long(id)
        .help(help)
        .value_name("DIR")
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

fn build_cli(locale: &str) -> Command {
    Command::new("shard-report")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .arg(
            Arg::new("action")
                .help(t!("arg_action", locale = locale).to_string())
                .value_name("ACTION")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("arg_config", locale = locale).to_string())
                .value_name("CONFIG")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(path_arg(
            "results-dir",
            t!("arg_results_dir", locale = locale).to_string(),
        ))
        .arg(path_arg(
            "reports-dir",
            t!("arg_reports_dir", locale = locale).to_string(),
        ))
        .arg(path_arg(
            "raw-results-dir",
            t!("arg_raw_results_dir", locale = locale).to_string(),
        ))
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help(t!("arg_strict", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help(t!("arg_verbose", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
}

/// Parses the process arguments. Exits with clap's usage message on invalid input.
pub fn parse_args() -> CliArgs {
    let language = resolve_locale(&pre_parse_language());
    let matches = build_cli(&language).get_matches();
    CliArgs::from_matches(&matches)
}

/// Resolves configuration and locale, then runs the requested action.
///
/// 解析配置与语言，然后执行请求的操作。
pub async fn process_command(args: CliArgs) -> Result<()> {
    let mut config = resolve_config(args.config.as_deref())?;
    args.apply_overrides(&mut config);

    let locale = resolve_locale(
        &config
            .language
            .clone()
            .unwrap_or_else(system_locale),
    );
    rust_i18n::set_locale(&locale);

    let action = resolve_action(args.action.as_deref(), args.strict, &locale)?;
    tracing::debug!(%action, %locale, results_dir = %config.results_dir.display(), "resolved action");

    // Summary and list keep the default Ctrl-C behavior and exit immediately.
    let cancel = if action.runs_generator() {
        setup_signal_handler(&locale)
    } else {
        CancellationToken::new()
    };

    match action {
        Action::Rich => {
            commands::rich::execute(&config, &cancel, &locale).await;
        }
        Action::Summary => {
            commands::summary::execute(&config, &locale)?;
        }
        Action::List => {
            commands::list::execute(&config, &locale);
        }
        Action::All => commands::all::execute(&config, &cancel, &locale).await?,
    }
    Ok(())
}

/// Cancels the returned token on Ctrl-C.
fn setup_signal_handler(locale: &str) -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n{}", t!("rich.cancelled", locale = &locale).yellow());
            token_clone.cancel();
        }
    });

    token
}
