//! Command-line interface

mod check;
mod report;
pub mod style;

pub use check::run_check;

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  $ is-mergeable jamiebuilds/is-mergeable#14 --check ci/build --check ci/test --min-reviews 2
  $ is-mergeable --owner jamiebuilds --repo is-mergeable --pull-request 14 --check ci/build,ci/test

Exit status is 0 when the pull request is ready to merge, 1 when it is not, and 2 on errors.
The API token is read from $GITHUB_API_TOKEN (or $GITHUB_TOKEN).";

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored human-readable report
    #[default]
    Text,
    /// The verdict as JSON
    Json,
}

/// Check whether a GitHub pull request is ready to be merged
#[derive(Debug, Parser)]
#[command(name = "is-mergeable", version, about, after_help = EXAMPLES)]
pub struct Cli {
    /// Pull request as <owner>/<repo>#<number> or its URL
    #[arg(value_name = "PULL_REQUEST")]
    pub target: Option<String>,

    /// Repository owner
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long)]
    pub repo: Option<String>,

    /// Pull request number
    #[arg(long = "pull-request", value_name = "NUMBER")]
    pub pull_request: Option<u64>,

    /// Check or status context that must succeed (repeatable, comma-separated)
    #[arg(long = "check", value_name = "NAME")]
    pub checks: Vec<String>,

    /// Minimum number of approving reviews
    #[arg(long, value_name = "N")]
    pub min_reviews: Option<u32>,

    /// Don't require GitHub to report the pull request as mergeable or rebaseable
    #[arg(long)]
    pub ignore_git_mergeability: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Policy file (default: .is-mergeable.toml if present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// GitHub REST API root, for GitHub Enterprise
    #[arg(long, env = "GITHUB_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
