//! Human-readable verdict report

use crate::cli::style::{BULLET, CHECK, CROSS, QUESTION, Stylize, hyperlink};
use is_mergeable::types::Verdict;

const SHORT_SHA_LEN: usize = 7;

fn plural(count: u64, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

fn mark(ok: bool, label: &str, fail: fn(&String) -> String) -> String {
    let text = if ok {
        format!("{CHECK} {label}")
    } else {
        format!("{CROSS} {label}")
    };
    if ok { text.success() } else { fail(&text) }
}

/// Render the full report for a verdict
pub fn render_report(verdict: &Verdict) -> String {
    let target = format!(
        "{}/{}#{}",
        verdict.repo_owner, verdict.repo_name, verdict.pull_request_number
    );
    let is_open = verdict.pull_request_state == "open";
    let mut lines: Vec<String> = vec![String::new()];

    // Header
    let badge = if is_open {
        " Open ".success_badge()
    } else {
        " Closed ".error_badge()
    };
    lines.push(format!(
        "{badge} {} {}",
        verdict.pull_request_title.emphasis(),
        format!("({target})").muted()
    ));
    let short_sha: String = verdict.head_sha.chars().take(SHORT_SHA_LEN).collect();
    lines.push(
        format!(
            "@{} wants to merge {} {} into {} from {} ({short_sha})",
            verdict.pull_request_creator,
            verdict.pull_request_commits,
            plural(verdict.pull_request_commits, "commit", "commits"),
            verdict.pull_request_base_ref,
            verdict.pull_request_head_ref,
        )
        .muted(),
    );
    lines.push(hyperlink(&verdict.pull_request_url).accent());
    lines.push(String::new());

    // Native state
    let state_label = if is_open { "Open" } else { "Closed" };
    lines.push(format!("  {}", mark(is_open, state_label, Stylize::error)));
    lines.push(format!(
        "  {}",
        mark(verdict.pull_request_git_mergeable, "Mergeable", Stylize::warn)
    ));
    lines.push(format!(
        "  {}",
        mark(verdict.pull_request_git_rebaseable, "Rebaseable", Stylize::warn)
    ));

    // Reviews
    let reviews_label = format!(
        "Reviews: ({} approved, {} requested changes, {} pending)",
        verdict.approved_reviews.len(),
        verdict.requested_changes_reviews.len(),
        verdict.pending_review_requests.len()
    );
    lines.push(format!(
        "  {}",
        mark(verdict.has_required_reviews, &reviews_label, Stylize::error)
    ));
    lines.extend(
        verdict
            .approved_reviews
            .iter()
            .map(|r| format!("    {}", format!("{CHECK} @{} approved", r.name).success())),
    );
    lines.extend(
        verdict
            .requested_changes_reviews
            .iter()
            .map(|r| format!("    {}", format!("{CROSS} @{} requested changes", r.name).error())),
    );
    lines.extend(
        verdict
            .pending_review_requests
            .iter()
            .map(|r| format!("    {}", format!("{BULLET} @{} pending reviewer", r.name).warn())),
    );

    // Checks
    let checks_label = format!(
        "Checks: ({} successes, {} failures, {} pending)",
        verdict.success_checks.len(),
        verdict.failure_checks.len() + verdict.error_checks.len(),
        verdict.pending_checks.len()
    );
    lines.push(format!(
        "  {}",
        mark(verdict.has_required_checks, &checks_label, Stylize::error)
    ));
    let check_lines = [
        (&verdict.success_checks, CHECK, "success"),
        (&verdict.failure_checks, CROSS, "failure"),
        (&verdict.error_checks, CROSS, "error"),
        (&verdict.pending_checks, BULLET, "pending"),
        (&verdict.missing_checks, QUESTION, "never reported"),
    ];
    for (checks, symbol, outcome) in check_lines {
        for check in checks {
            let text = format!("{symbol} {} {outcome}", check.name);
            let styled = match outcome {
                "success" => text.success(),
                "failure" | "error" => text.error(),
                _ => text.warn(),
            };
            lines.push(format!("    {styled}"));
        }
    }
    lines.push(String::new());

    // Banner
    lines.push(if verdict.is_ready_to_merge {
        format!(" {CHECK} {target} is ready to be merged. ").success_badge()
    } else {
        format!(" {CROSS} {target} is not ready to be merged. ").error_badge()
    });

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
