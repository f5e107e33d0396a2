//! Policy evaluation - pure, no I/O

use super::checks::CheckBuckets;
use super::reviews::ReviewBuckets;
use crate::types::{Named, PullRequestInfo};
use serde::{Deserialize, Serialize};

/// Policy knobs for a readiness evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessOptions {
    /// Minimum number of approving reviewers
    pub min_reviews: Option<u32>,
    /// Status contexts or check names that must each have succeeded
    pub required_checks: Option<Vec<String>>,
    /// Skip the platform's mergeable/rebaseable assessment
    pub ignore_git_mergeability: bool,
}

/// Result of applying [`ReadinessOptions`] to classified buckets
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct PolicyOutcome {
    /// Minimum approvals met (or not configured)
    pub has_required_reviews: bool,
    /// Every required check succeeded (or none configured)
    pub has_required_checks: bool,
    /// Required checks that neither source ever reported
    pub missing_checks: Vec<Named>,
    /// Overall verdict
    pub is_ready_to_merge: bool,
}

/// Apply the readiness policy
///
/// The PR is ready when it is open, the platform can merge or rebase it (unless
/// `ignore_git_mergeability`), and both the review and check requirements hold.
pub fn evaluate_policy(
    pull_request: &PullRequestInfo,
    reviews: &ReviewBuckets,
    checks: &CheckBuckets,
    options: &ReadinessOptions,
) -> PolicyOutcome {
    let has_required_reviews = options
        .min_reviews
        .is_none_or(|min| reviews.approved.len() >= min as usize);

    let required = options.required_checks.as_deref().unwrap_or_default();
    let has_required_checks = required.iter().all(|name| checks.is_success(name));
    let missing_checks = required
        .iter()
        .filter(|name| !checks.was_reported(name))
        .map(Named::new)
        .collect();

    let is_open = pull_request.state == "open";
    let is_mergeable = options.ignore_git_mergeability
        || pull_request.mergeable.unwrap_or(false)
        || pull_request.rebaseable.unwrap_or(false);

    PolicyOutcome {
        has_required_reviews,
        has_required_checks,
        missing_checks,
        is_ready_to_merge: is_open && is_mergeable && has_required_reviews && has_required_checks,
    }
}
