//! Check command - fetch, evaluate and report

use crate::cli::report::render_report;
use crate::cli::style::spinner_style;
use crate::cli::{Cli, OutputFormat};
use anstream::{print, println};
use anyhow::Context;
use indicatif::ProgressBar;
use is_mergeable::auth::get_github_auth;
use is_mergeable::config::{PolicyFile, PolicyOverrides, resolve_options, resolve_target};
use is_mergeable::platform::{GitHubService, PlatformService};
use is_mergeable::readiness::evaluate;
use is_mergeable::types::Verdict;
use std::time::Duration;
use tracing::info;

/// Run the check and print the report
///
/// Returns the verdict so the caller can pick the exit status.
pub async fn run_check(cli: &Cli) -> anyhow::Result<Verdict> {
    // =========================================================================
    // Phase 1: CONFIGURE - validate input before touching the network
    // =========================================================================

    let target = resolve_target(
        cli.target.as_deref(),
        cli.owner.as_deref(),
        cli.repo.as_deref(),
        cli.pull_request,
    )?;
    let auth = get_github_auth()?;

    let cwd = std::env::current_dir().context("failed to read the working directory")?;
    let policy_file = PolicyFile::discover(cli.config.as_deref(), &cwd)?;
    let options = resolve_options(
        policy_file.as_ref(),
        &PolicyOverrides {
            checks: cli.checks.clone(),
            min_reviews: cli.min_reviews,
            ignore_git_mergeability: cli.ignore_git_mergeability,
        },
    );
    info!(pr = %target, token_source = auth.source, ?options, "checking pull request");

    // =========================================================================
    // Phase 2: FETCH - one snapshot, all requests in flight together
    // =========================================================================

    let platform = GitHubService::new(
        &auth.token,
        target.owner.clone(),
        target.repo.clone(),
        cli.api_url.as_deref(),
    )?;

    let spinner = (cli.format == OutputFormat::Text).then(|| {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.set_message(format!("Fetching {target}..."));
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    });

    let snapshot = platform.fetch_snapshot(target.number).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let snapshot = snapshot.with_context(|| format!("failed to fetch {target}"))?;

    // =========================================================================
    // Phase 3: EVALUATE + REPORT
    // =========================================================================

    let verdict = evaluate(&snapshot, &options)?;

    match cli.format {
        OutputFormat::Text => print!("{}", render_report(&verdict)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&verdict).context("failed to serialize verdict")?
        ),
    }

    Ok(verdict)
}
