//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::{PlatformService, ReviewRequests};
use crate::types::{
    BranchInfo, CommitInfo, PullRequestInfo, RawCheckRun, RawReview, RawStatus, ReviewRequest,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Default REST API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Items requested per page on list endpoints
const PER_PAGE: u32 = 100;

/// Upper bound on pages fetched from any one list endpoint
const MAX_PAGES: u32 = 50;

/// Whether `page` ends a paginated listing of `route`
///
/// A short page ends it. A full page at [`MAX_PAGES`] also ends it, with a warning,
/// because anything after it is dropped.
fn is_last_page(route: &str, page: u32, len: usize) -> bool {
    if len < PER_PAGE as usize {
        return true;
    }
    if page >= MAX_PAGES {
        warn!(
            route,
            pages = MAX_PAGES,
            "listing truncated at the page limit; later items are ignored"
        );
        return true;
    }
    false
}

// REST response types, trimmed to the fields we read

#[derive(Deserialize)]
struct GhUser {
    login: String,
}

#[derive(Deserialize)]
struct GhTeam {
    name: String,
}

#[derive(Deserialize)]
struct GhRepo {
    name: String,
    owner: GhUser,
}

#[derive(Deserialize)]
struct GhPrRef {
    #[serde(rename = "ref")]
    ref_field: String,
    repo: Option<GhRepo>,
}

#[derive(Deserialize)]
struct GhPullRequest {
    number: u64,
    title: Option<String>,
    state: String,
    user: Option<GhUser>,
    commits: Option<u64>,
    html_url: Option<String>,
    mergeable: Option<bool>,
    rebaseable: Option<bool>,
    base: GhPrRef,
    head: GhPrRef,
}

#[derive(Deserialize)]
struct GhBranchCommit {
    sha: String,
}

#[derive(Deserialize)]
struct GhBranch {
    name: String,
    commit: GhBranchCommit,
}

#[derive(Deserialize)]
struct GhCommitDetail {
    message: String,
}

#[derive(Deserialize)]
struct GhCommit {
    sha: String,
    commit: GhCommitDetail,
}

#[derive(Deserialize)]
struct GhRequestedReviewers {
    #[serde(default)]
    users: Vec<GhUser>,
    #[serde(default)]
    teams: Vec<GhTeam>,
}

#[derive(Deserialize)]
struct GhReview {
    id: u64,
    user: Option<GhUser>,
    state: String,
}

#[derive(Deserialize)]
struct GhStatus {
    context: String,
    state: String,
    updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct GhCheckRuns {
    check_runs: Vec<GhCheckRun>,
}

#[derive(Deserialize)]
struct GhCheckRun {
    name: String,
    status: String,
    conclusion: Option<String>,
}

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    owner: String,
    repo: String,
    /// Token for raw HTTP requests (status and check-run listing)
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
    /// API root for raw requests, without trailing slash
    api_url: String,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `api_url` overrides the REST root, e.g. `https://github.example.com/api/v3`
    /// for GitHub Enterprise.
    pub fn new(token: &str, owner: String, repo: String, api_url: Option<&str>) -> Result<Self> {
        let api_url = api_url
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_url.as_str())
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent(concat!("is-mergeable/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            owner,
            repo,
            token: token.to_string(),
            http_client,
            api_url,
        })
    }

    fn repo_route(&self, rest: &str) -> String {
        format!("/repos/{}/{}/{rest}", self.owner, self.repo)
    }

    /// Walk a paginated octocrab list endpoint until a short page comes back
    async fn get_all<T: DeserializeOwned>(&self, route: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        for page in 1..=MAX_PAGES {
            let batch: Vec<T> = self
                .client
                .get(route, Some(&[("per_page", PER_PAGE), ("page", page)]))
                .await?;
            let last = is_last_page(route, page, batch.len());
            items.extend(batch);
            if last {
                break;
            }
        }
        Ok(items)
    }

    /// GET a page from a raw endpoint
    async fn raw_get_page<T: DeserializeOwned>(&self, route: &str, page: u32) -> Result<T> {
        let url = format!("{}{route}", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("per_page", PER_PAGE), ("page", page)])
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch {route}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "{route} returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse {route}: {e}")))
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequestInfo> {
        debug!(pr_number, "getting PR");
        let pr: GhPullRequest = self
            .client
            .get(self.repo_route(&format!("pulls/{pr_number}")), None::<&()>)
            .await?;

        // The base repository is authoritative for owner/name; fall back to what we
        // were asked for if GitHub omits it (deleted forks).
        let (owner, repo) = pr.base.repo.map_or_else(
            || (self.owner.clone(), self.repo.clone()),
            |r| (r.owner.login, r.name),
        );

        let info = PullRequestInfo {
            owner,
            repo,
            number: pr.number,
            title: pr.title.unwrap_or_default(),
            state: pr.state,
            creator: pr.user.map(|u| u.login),
            commits: pr.commits,
            base_ref: pr.base.ref_field,
            head_ref: pr.head.ref_field,
            html_url: pr.html_url.unwrap_or_default(),
            mergeable: pr.mergeable,
            rebaseable: pr.rebaseable,
        };

        debug!(pr_number, state = %info.state, mergeable = ?info.mergeable, "got PR");
        Ok(info)
    }

    async fn get_branch(&self, branch: &str) -> Result<BranchInfo> {
        debug!(branch, "getting branch");
        let gh: GhBranch = self
            .client
            .get(self.repo_route(&format!("branches/{branch}")), None::<&()>)
            .await?;

        Ok(BranchInfo {
            name: gh.name,
            commit_sha: gh.commit.sha,
        })
    }

    async fn list_commits(&self, pr_number: u64) -> Result<Vec<CommitInfo>> {
        let commits: Vec<GhCommit> = self
            .get_all(&self.repo_route(&format!("pulls/{pr_number}/commits")))
            .await?;
        debug!(pr_number, count = commits.len(), "listed commits");

        Ok(commits
            .into_iter()
            .map(|c| CommitInfo {
                sha: c.sha,
                message: c.commit.message,
            })
            .collect())
    }

    async fn list_review_requests(&self, pr_number: u64) -> Result<ReviewRequests> {
        let requested: GhRequestedReviewers = self
            .client
            .get(
                self.repo_route(&format!("pulls/{pr_number}/requested_reviewers")),
                None::<&()>,
            )
            .await?;
        debug!(
            pr_number,
            users = requested.users.len(),
            teams = requested.teams.len(),
            "listed review requests"
        );

        Ok(ReviewRequests {
            teams: requested
                .teams
                .into_iter()
                .map(|t| ReviewRequest { name: t.name })
                .collect(),
            users: requested
                .users
                .into_iter()
                .map(|u| ReviewRequest { name: u.login })
                .collect(),
        })
    }

    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<RawReview>> {
        let reviews: Vec<GhReview> = self
            .get_all(&self.repo_route(&format!("pulls/{pr_number}/reviews")))
            .await?;
        debug!(pr_number, count = reviews.len(), "listed reviews");

        Ok(reviews
            .into_iter()
            .map(|r| RawReview {
                id: r.id,
                author: r.user.map(|u| u.login),
                state: r.state,
            })
            .collect())
    }

    async fn list_statuses(&self, git_ref: &str) -> Result<Vec<RawStatus>> {
        let route = self.repo_route(&format!("commits/{git_ref}/statuses"));
        let mut statuses = Vec::new();

        for page in 1..=MAX_PAGES {
            let batch: Vec<GhStatus> = self.raw_get_page(&route, page).await?;
            let last = is_last_page(&route, page, batch.len());
            statuses.extend(batch.into_iter().map(|s| RawStatus {
                context: s.context,
                state: s.state,
                updated_at: s.updated_at,
            }));
            if last {
                break;
            }
        }

        debug!(git_ref, count = statuses.len(), "listed commit statuses");
        Ok(statuses)
    }

    async fn list_check_runs(&self, git_ref: &str) -> Result<Vec<RawCheckRun>> {
        let route = self.repo_route(&format!("commits/{git_ref}/check-runs"));
        let mut runs = Vec::new();

        for page in 1..=MAX_PAGES {
            let batch: GhCheckRuns = self.raw_get_page(&route, page).await?;
            let last = is_last_page(&route, page, batch.check_runs.len());
            runs.extend(batch.check_runs.into_iter().map(|r| RawCheckRun {
                name: r.name,
                status: r.status,
                conclusion: r.conclusion,
            }));
            if last {
                break;
            }
        }

        debug!(git_ref, count = runs.len(), "listed check runs");
        Ok(runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_page_ends_listing() {
        assert!(is_last_page("/repos/o/r/pulls/1/reviews", 1, 0));
        assert!(is_last_page("/repos/o/r/pulls/1/reviews", 3, PER_PAGE as usize - 1));
    }

    #[test]
    fn test_full_page_continues_listing() {
        assert!(!is_last_page("/repos/o/r/pulls/1/reviews", 1, PER_PAGE as usize));
        assert!(!is_last_page("/repos/o/r/pulls/1/reviews", MAX_PAGES - 1, PER_PAGE as usize));
    }

    #[test]
    fn test_full_page_at_limit_stops() {
        assert!(is_last_page("/repos/o/r/pulls/1/reviews", MAX_PAGES, PER_PAGE as usize));
    }
}
