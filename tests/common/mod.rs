//! Shared test fixtures

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::MockPlatformService;

use chrono::{DateTime, TimeZone, Utc};
use is_mergeable::types::{
    BranchInfo, CommitInfo, PullRequestInfo, PullRequestSnapshot, RawCheckRun, RawReview,
    RawStatus, ReviewRequest,
};

/// An open, mergeable PR with no reviews or checks
pub fn make_pr(number: u64) -> PullRequestInfo {
    PullRequestInfo {
        owner: "octo".to_string(),
        repo: "widgets".to_string(),
        number,
        title: format!("PR {number}"),
        state: "open".to_string(),
        creator: Some("alice".to_string()),
        commits: Some(2),
        base_ref: "main".to_string(),
        head_ref: "feat".to_string(),
        html_url: format!("https://github.com/octo/widgets/pull/{number}"),
        mergeable: Some(true),
        rebaseable: Some(true),
    }
}

/// Snapshot wrapping [`make_pr`] with empty collections
pub fn make_snapshot(number: u64) -> PullRequestSnapshot {
    PullRequestSnapshot {
        pull_request: make_pr(number),
        branch: BranchInfo {
            name: "feat".to_string(),
            commit_sha: "abc1234def".to_string(),
        },
        commits: vec![
            CommitInfo {
                sha: "1111111".to_string(),
                message: "First".to_string(),
            },
            CommitInfo {
                sha: "abc1234def".to_string(),
                message: "Second".to_string(),
            },
        ],
        requested_teams: vec![],
        requested_users: vec![],
        reviews: vec![],
        statuses: vec![],
        check_runs: vec![],
    }
}

pub fn review(id: u64, author: &str, state: &str) -> RawReview {
    RawReview {
        id,
        author: Some(author.to_string()),
        state: state.to_string(),
    }
}

pub fn request(name: &str) -> ReviewRequest {
    ReviewRequest {
        name: name.to_string(),
    }
}

/// Fixed point in time, offset by `minutes`
pub fn at(minutes: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + chrono::Duration::minutes(i64::from(minutes))
}

pub fn status(context: &str, state: &str, minutes: u32) -> RawStatus {
    RawStatus {
        context: context.to_string(),
        state: state.to_string(),
        updated_at: at(minutes),
    }
}

pub fn check_run(name: &str, status: &str, conclusion: Option<&str>) -> RawCheckRun {
    RawCheckRun {
        name: name.to_string(),
        status: status.to_string(),
        conclusion: conclusion.map(ToString::to_string),
    }
}
