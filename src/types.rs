//! Core types for is-mergeable
//!
//! Raw records mirror what the platform hands back, with nullable fields kept as
//! `Option`. State fields stay as strings until classification so an unknown value
//! can be reported verbatim.

use crate::error::{Error, UnexpectedKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Reviewer name used when the platform omits the review author
pub const UNKNOWN_REVIEWER: &str = "unknownReviewer";

/// Creator name used when the platform omits the pull request author
pub const UNKNOWN_CREATOR: &str = "unknownCreator";

/// A single review on a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReview {
    /// Review ID, increasing with each new review
    pub id: u64,
    /// Login of the reviewer (absent for deleted accounts)
    pub author: Option<String>,
    /// Review state as reported, e.g. `APPROVED`
    pub state: String,
}

impl RawReview {
    /// Reviewer login, falling back to [`UNKNOWN_REVIEWER`]
    pub fn author_name(&self) -> &str {
        self.author.as_deref().unwrap_or(UNKNOWN_REVIEWER)
    }
}

/// A legacy commit status update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStatus {
    /// Status context, unique per reporting source
    pub context: String,
    /// Status state as reported, e.g. `success`
    pub state: String,
    /// When this update was made
    pub updated_at: DateTime<Utc>,
}

/// A check run from the checks API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCheckRun {
    /// Check run name
    pub name: String,
    /// Run status, e.g. `completed`
    pub status: String,
    /// Run conclusion, only present once completed
    pub conclusion: Option<String>,
}

/// A pending review request for a user or a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// User login or team name
    pub name: String,
}

/// The head branch of a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchInfo {
    /// Branch name
    pub name: String,
    /// SHA of the branch tip
    pub commit_sha: String,
}

/// A commit on a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit SHA
    pub sha: String,
    /// Full commit message
    pub message: String,
}

/// Descriptive pull request metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestInfo {
    /// Owner login of the base repository
    pub owner: String,
    /// Name of the base repository
    pub repo: String,
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// PR state as reported (`open` or `closed`)
    pub state: String,
    /// Login of the PR author
    pub creator: Option<String>,
    /// Number of commits, when the platform reports it
    pub commits: Option<u64>,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// Web URL for the PR
    pub html_url: String,
    /// Platform's own mergeability assessment (absent while computing)
    pub mergeable: Option<bool>,
    /// Platform's own rebaseability assessment
    pub rebaseable: Option<bool>,
}

/// Everything fetched for one pull request, consumed by the readiness engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestSnapshot {
    /// Pull request metadata
    pub pull_request: PullRequestInfo,
    /// Head branch
    pub branch: BranchInfo,
    /// Commits on the PR
    pub commits: Vec<CommitInfo>,
    /// Pending team review requests
    pub requested_teams: Vec<ReviewRequest>,
    /// Pending user review requests
    pub requested_users: Vec<ReviewRequest>,
    /// All reviews, in any order
    pub reviews: Vec<RawReview>,
    /// All status updates for the head ref, in any order
    pub statuses: Vec<RawStatus>,
    /// All check runs for the head ref
    pub check_runs: Vec<RawCheckRun>,
}

/// A named entry in one of the verdict buckets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Named {
    /// Reviewer, team, status context or check name
    pub name: String,
}

impl Named {
    /// Create a named entry
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Outcome of a readiness evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct Verdict {
    /// Overall verdict
    pub is_ready_to_merge: bool,
    /// Whether the minimum number of approvals is met
    pub has_required_reviews: bool,
    /// Whether every required check succeeded
    pub has_required_checks: bool,
    /// Owner of the base repository
    pub repo_owner: String,
    /// Base repository name
    pub repo_name: String,
    /// PR number
    pub pull_request_number: u64,
    /// PR title
    pub pull_request_title: String,
    /// PR state (`open` or `closed`)
    pub pull_request_state: String,
    /// PR author login
    pub pull_request_creator: String,
    /// Number of commits on the PR
    pub pull_request_commits: u64,
    /// Base branch name
    pub pull_request_base_ref: String,
    /// Head branch name
    pub pull_request_head_ref: String,
    /// Web URL for the PR
    pub pull_request_url: String,
    /// Platform mergeable flag
    pub pull_request_git_mergeable: bool,
    /// Platform rebaseable flag
    pub pull_request_git_rebaseable: bool,
    /// SHA of the head branch tip
    pub head_sha: String,
    /// Reviewers whose latest review approved
    pub approved_reviews: Vec<Named>,
    /// Reviewers whose latest review requested changes
    pub requested_changes_reviews: Vec<Named>,
    /// Users and teams still asked to review
    pub pending_review_requests: Vec<Named>,
    /// Successful statuses and check runs
    pub success_checks: Vec<Named>,
    /// Failed statuses and check runs
    pub failure_checks: Vec<Named>,
    /// Errored statuses and cancelled check runs
    pub error_checks: Vec<Named>,
    /// Statuses and check runs still running
    pub pending_checks: Vec<Named>,
    /// Required checks never reported by either source
    pub missing_checks: Vec<Named>,
}

// =============================================================================
// Closed value sets
// =============================================================================

/// Review state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    /// Reviewer approved
    Approved,
    /// Reviewer requested changes
    ChangesRequested,
    /// Review was dismissed
    Dismissed,
    /// Reviewer only commented
    Commented,
}

impl FromStr for ReviewState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APPROVED" => Ok(Self::Approved),
            "CHANGES_REQUESTED" => Ok(Self::ChangesRequested),
            "DISMISSED" => Ok(Self::Dismissed),
            "COMMENTED" => Ok(Self::Commented),
            other => Err(Error::unexpected(UnexpectedKind::ReviewState, other)),
        }
    }
}

/// Legacy commit status state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusState {
    /// Passed
    Success,
    /// Failed
    Failure,
    /// Errored
    Error,
    /// Still running
    Pending,
}

impl FromStr for StatusState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "failure" => Ok(Self::Failure),
            "error" => Ok(Self::Error),
            "pending" => Ok(Self::Pending),
            other => Err(Error::unexpected(UnexpectedKind::StatusState, other)),
        }
    }
}

/// Check run status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Waiting to start
    Queued,
    /// Running
    InProgress,
    /// Finished, conclusion available
    Completed,
}

impl FromStr for CheckStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(Self::Queued),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(Error::unexpected(UnexpectedKind::CheckStatus, other)),
        }
    }
}

/// Check run conclusion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckConclusion {
    /// Passed
    Success,
    /// Finished without a pass/fail judgement
    Neutral,
    /// Failed
    Failure,
    /// Exceeded its time limit
    TimedOut,
    /// Cancelled before finishing
    Cancelled,
}

impl FromStr for CheckConclusion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "neutral" => Ok(Self::Neutral),
            "failure" => Ok(Self::Failure),
            "timed_out" => Ok(Self::TimedOut),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(Error::unexpected(UnexpectedKind::CheckConclusion, other)),
        }
    }
}
