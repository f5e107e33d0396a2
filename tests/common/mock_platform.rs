//! Mock platform service for testing

use async_trait::async_trait;
use is_mergeable::error::{Error, Result};
use is_mergeable::platform::{PlatformService, ReviewRequests};
use is_mergeable::types::{
    BranchInfo, CommitInfo, PullRequestInfo, PullRequestSnapshot, RawCheckRun, RawReview,
    RawStatus,
};
use std::sync::Mutex;

/// Simple mock platform service serving one fixed snapshot
///
/// This manually implements `PlatformService` rather than using mockall, so the
/// provided `fetch_snapshot` runs for real against it.
///
/// Features:
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    snapshot: PullRequestSnapshot,
    // Call tracking
    calls: Mutex<Vec<String>>,
    // Error injection
    error_on: Mutex<Option<(&'static str, String)>>,
}

impl MockPlatformService {
    /// Create a mock that serves the pieces of `snapshot`
    pub fn with_snapshot(snapshot: PullRequestSnapshot) -> Self {
        Self {
            snapshot,
            calls: Mutex::new(Vec::new()),
            error_on: Mutex::new(None),
        }
    }

    /// Make the named method return a `GitHubApi` error
    pub fn fail_on(&self, method: &'static str, msg: &str) {
        *self.error_on.lock().unwrap() = Some((method, msg.to_string()));
    }

    /// Recorded calls, as `method(arg)`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str, arg: impl std::fmt::Display) -> Result<()> {
        self.calls.lock().unwrap().push(format!("{method}({arg})"));
        match &*self.error_on.lock().unwrap() {
            Some((failing, msg)) if *failing == method => Err(Error::GitHubApi(msg.clone())),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequestInfo> {
        self.record("get_pull_request", pr_number)?;
        Ok(self.snapshot.pull_request.clone())
    }

    async fn get_branch(&self, branch: &str) -> Result<BranchInfo> {
        self.record("get_branch", branch)?;
        Ok(self.snapshot.branch.clone())
    }

    async fn list_commits(&self, pr_number: u64) -> Result<Vec<CommitInfo>> {
        self.record("list_commits", pr_number)?;
        Ok(self.snapshot.commits.clone())
    }

    async fn list_review_requests(&self, pr_number: u64) -> Result<ReviewRequests> {
        self.record("list_review_requests", pr_number)?;
        Ok(ReviewRequests {
            teams: self.snapshot.requested_teams.clone(),
            users: self.snapshot.requested_users.clone(),
        })
    }

    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<RawReview>> {
        self.record("list_reviews", pr_number)?;
        Ok(self.snapshot.reviews.clone())
    }

    async fn list_statuses(&self, git_ref: &str) -> Result<Vec<RawStatus>> {
        self.record("list_statuses", git_ref)?;
        Ok(self.snapshot.statuses.clone())
    }

    async fn list_check_runs(&self, git_ref: &str) -> Result<Vec<RawCheckRun>> {
        self.record("list_check_runs", git_ref)?;
        Ok(self.snapshot.check_runs.clone())
    }
}
