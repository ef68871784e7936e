//! Command-line interface
//!
//! Every input can be given as a flag or, as GitHub Actions does it, through
//! the environment (`INPUT_*` for action inputs, `GITHUB_*` for run context).

pub mod context;
pub mod update;

use auto_update::actions::LogFormat;
use auto_update::update::UpdateConfig;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Keep pull requests up to date with their base branch
#[derive(Parser, Debug)]
#[command(name = "auto-update", version, about)]
pub struct Cli {
    /// Token used to call the GitHub API (falls back to `GITHUB_TOKEN`/`GH_TOKEN`)
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Only update pull requests carrying this label
    #[arg(long, env = "INPUT_LABEL")]
    pub label: Option<String>,

    /// Also update draft pull requests
    #[arg(
        long,
        env = "INPUT_INCLUDE_DRAFTS",
        action = ArgAction::Set,
        value_parser = parse_input_bool,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    pub include_drafts: bool,

    /// Only update pull requests with auto-merge enabled
    #[arg(
        long,
        env = "INPUT_REQUIRE_AUTO_MERGE",
        action = ArgAction::Set,
        value_parser = parse_input_bool,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    pub require_auto_merge: bool,

    /// Skip pull requests GitHub already reports as conflicting
    #[arg(
        long,
        env = "INPUT_SKIP_CONFLICTING",
        action = ArgAction::Set,
        value_parser = parse_input_bool,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    pub skip_conflicting: bool,

    /// Name of the triggering event
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    pub event_name: String,

    /// Path to the JSON payload of the triggering event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: PathBuf,

    /// Repository whose pull requests are updated (`owner/repo`)
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    /// GitHub API root, for GitHub Enterprise Server
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Log output format
    #[arg(long, env = "AUTO_UPDATE_LOG_FORMAT", value_enum, default_value_t = LogFormatArg::Auto)]
    pub log_format: LogFormatArg,
}

impl Cli {
    /// Library configuration derived from the inputs
    pub fn update_config(&self) -> UpdateConfig {
        UpdateConfig {
            label: self.label.clone().filter(|l| !l.trim().is_empty()),
            skip_drafts: !self.include_drafts,
            require_auto_merge: self.require_auto_merge,
            skip_known_conflicts: self.skip_conflicting,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    /// Workflow commands inside GitHub Actions, plain lines elsewhere
    Auto,
    /// Workflow commands on stdout
    Actions,
    /// Plain lines on stderr
    Plain,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Auto => Self::Auto,
            LogFormatArg::Actions => Self::Actions,
            LogFormatArg::Plain => Self::Plain,
        }
    }
}

/// Whether the process runs as a GitHub Actions step
pub fn in_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

/// Parse a boolean action input
///
/// Actions passes unset inputs as empty strings, which read as false.
fn parse_input_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "no" | "off" => Ok(false),
        "true" | "1" | "yes" | "on" => Ok(true),
        other => Err(format!("expected a boolean, got \"{other}\"")),
    }
}
