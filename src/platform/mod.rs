//! Platform services
//!
//! Retrieves the raw records the readiness engine consumes.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{
    BranchInfo, CommitInfo, PullRequestInfo, PullRequestSnapshot, RawCheckRun, RawReview,
    RawStatus, ReviewRequest,
};
use async_trait::async_trait;
use tracing::debug;

/// Pending review requests, split the way the platform reports them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewRequests {
    /// Requested teams
    pub teams: Vec<ReviewRequest>,
    /// Requested users
    pub users: Vec<ReviewRequest>,
}

/// Platform service trait for read-only PR queries
///
/// Implementors provide one method per retrieval. [`fetch_snapshot`] combines them
/// and should not normally be overridden.
///
/// [`fetch_snapshot`]: Self::fetch_snapshot
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Get PR metadata
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequestInfo>;

    /// Get a branch and its tip commit
    async fn get_branch(&self, branch: &str) -> Result<BranchInfo>;

    /// List commits on a PR
    async fn list_commits(&self, pr_number: u64) -> Result<Vec<CommitInfo>>;

    /// List pending review requests on a PR
    async fn list_review_requests(&self, pr_number: u64) -> Result<ReviewRequests>;

    /// List all reviews on a PR
    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<RawReview>>;

    /// List legacy commit statuses for a ref
    async fn list_statuses(&self, git_ref: &str) -> Result<Vec<RawStatus>>;

    /// List check runs for a ref
    async fn list_check_runs(&self, git_ref: &str) -> Result<Vec<RawCheckRun>>;

    /// Fetch everything needed to evaluate a PR
    ///
    /// The PR is fetched first to learn its head ref; the six remaining queries then
    /// run concurrently. The first failure aborts the whole fetch, so callers only
    /// ever see a complete snapshot.
    async fn fetch_snapshot(&self, pr_number: u64) -> Result<PullRequestSnapshot> {
        debug!(pr_number, "fetching snapshot");
        let pull_request = self.get_pull_request(pr_number).await?;
        let head_ref = pull_request.head_ref.as_str();

        let (branch, commits, requests, reviews, statuses, check_runs) = tokio::try_join!(
            self.get_branch(head_ref),
            self.list_commits(pr_number),
            self.list_review_requests(pr_number),
            self.list_reviews(pr_number),
            self.list_statuses(head_ref),
            self.list_check_runs(head_ref),
        )?;

        debug!(
            pr_number,
            commits = commits.len(),
            reviews = reviews.len(),
            statuses = statuses.len(),
            check_runs = check_runs.len(),
            "fetched snapshot"
        );

        Ok(PullRequestSnapshot {
            pull_request,
            branch,
            commits,
            requested_teams: requests.teams,
            requested_users: requests.users,
            reviews,
            statuses,
            check_runs,
        })
    }
}
