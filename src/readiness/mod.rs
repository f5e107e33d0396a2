//! Readiness engine
//!
//! Pure functions that turn a fetched [`PullRequestSnapshot`] into a [`Verdict`].
//! No I/O happens here - all data is passed in, making it easy to unit test.
//!
//! 1. Reduce - latest review per author, latest status per context
//! 2. Classify - sort the reduced records into outcome buckets
//! 3. Decide - apply [`ReadinessOptions`]

mod checks;
mod policy;
mod reviews;

pub use checks::{CheckBuckets, reduce_check_runs, reduce_checks, reduce_statuses};
pub use policy::{PolicyOutcome, ReadinessOptions, evaluate_policy};
pub use reviews::{ReviewBuckets, reduce_reviews};

use crate::error::Result;
use crate::types::{PullRequestSnapshot, UNKNOWN_CREATOR, Verdict};
use std::collections::HashMap;
use tracing::debug;

/// Evaluate whether the snapshot's pull request is ready to merge
///
/// Fails on the first platform value outside its documented set; no partial
/// verdict is produced in that case.
pub fn evaluate(snapshot: &PullRequestSnapshot, options: &ReadinessOptions) -> Result<Verdict> {
    let pr = &snapshot.pull_request;
    debug!(
        pr_number = pr.number,
        reviews = snapshot.reviews.len(),
        statuses = snapshot.statuses.len(),
        check_runs = snapshot.check_runs.len(),
        "evaluating readiness"
    );

    let reviews = reduce_reviews(
        &snapshot.reviews,
        &snapshot.requested_teams,
        &snapshot.requested_users,
    )?;
    let checks = reduce_checks(&snapshot.statuses, &snapshot.check_runs)?;
    let outcome = evaluate_policy(pr, &reviews, &checks, options);

    debug!(
        pr_number = pr.number,
        has_required_reviews = outcome.has_required_reviews,
        has_required_checks = outcome.has_required_checks,
        is_ready_to_merge = outcome.is_ready_to_merge,
        "evaluated readiness"
    );

    Ok(Verdict {
        is_ready_to_merge: outcome.is_ready_to_merge,
        has_required_reviews: outcome.has_required_reviews,
        has_required_checks: outcome.has_required_checks,
        repo_owner: pr.owner.clone(),
        repo_name: pr.repo.clone(),
        pull_request_number: pr.number,
        pull_request_title: pr.title.clone(),
        pull_request_state: pr.state.clone(),
        pull_request_creator: pr
            .creator
            .clone()
            .unwrap_or_else(|| UNKNOWN_CREATOR.to_string()),
        pull_request_commits: pr.commits.unwrap_or(snapshot.commits.len() as u64),
        pull_request_base_ref: pr.base_ref.clone(),
        pull_request_head_ref: pr.head_ref.clone(),
        pull_request_url: pr.html_url.clone(),
        pull_request_git_mergeable: pr.mergeable.unwrap_or(false),
        pull_request_git_rebaseable: pr.rebaseable.unwrap_or(false),
        head_sha: snapshot.branch.commit_sha.clone(),
        approved_reviews: reviews.approved,
        requested_changes_reviews: reviews.requested_changes,
        pending_review_requests: reviews.pending,
        success_checks: checks.success,
        failure_checks: checks.failure,
        error_checks: checks.error,
        pending_checks: checks.pending,
        missing_checks: outcome.missing_checks,
    })
}

/// Keep one item per key, replacing it when `is_newer(candidate, current)` holds
///
/// Output follows the order in which each key was first seen.
fn latest_by_key<'a, T>(
    items: impl IntoIterator<Item = &'a T>,
    key: impl Fn(&'a T) -> &'a str,
    is_newer: impl Fn(&T, &T) -> bool,
) -> Vec<&'a T> {
    let mut slots: HashMap<&'a str, usize> = HashMap::new();
    let mut latest: Vec<&'a T> = Vec::new();

    for item in items {
        let k = key(item);
        if let Some(&slot) = slots.get(k) {
            if is_newer(item, latest[slot]) {
                latest[slot] = item;
            }
        } else {
            slots.insert(k, latest.len());
            latest.push(item);
        }
    }

    latest
}
