//! Status and check-run reduction
//!
//! GitHub has two CI systems:
//! 1. Commit Status API (legacy) - used by external CI services
//! 2. Check Runs API (modern) - used by GitHub Actions
//!
//! Both feed the same buckets. Names are never merged across the two sources, so a
//! CI that reports through both shows up twice.

use super::latest_by_key;
use crate::error::{Error, Result, UnexpectedKind};
use crate::types::{CheckConclusion, CheckStatus, Named, RawCheckRun, RawStatus, StatusState};

/// Statuses and check runs classified by outcome
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckBuckets {
    /// Passed
    pub success: Vec<Named>,
    /// Failed or timed out
    pub failure: Vec<Named>,
    /// Errored or cancelled
    pub error: Vec<Named>,
    /// Queued or running
    pub pending: Vec<Named>,
}

impl CheckBuckets {
    /// Whether `name` reported success through either source
    pub fn is_success(&self, name: &str) -> bool {
        contains(&self.success, name)
    }

    /// Whether `name` reported at all as success, pending or failure
    ///
    /// Errored checks are not consulted here.
    pub fn was_reported(&self, name: &str) -> bool {
        contains(&self.success, name)
            || contains(&self.pending, name)
            || contains(&self.failure, name)
    }
}

fn contains(bucket: &[Named], name: &str) -> bool {
    bucket.iter().any(|entry| entry.name == name)
}

/// Classify the latest status per context into `buckets`
pub fn reduce_statuses(statuses: &[RawStatus], buckets: &mut CheckBuckets) -> Result<()> {
    let latest = latest_by_key(
        statuses,
        |status| status.context.as_str(),
        |candidate, current| candidate.updated_at > current.updated_at,
    );

    for status in latest {
        let entry = Named::new(&status.context);
        match status.state.parse::<StatusState>()? {
            StatusState::Success => buckets.success.push(entry),
            StatusState::Failure => buckets.failure.push(entry),
            StatusState::Error => buckets.error.push(entry),
            StatusState::Pending => buckets.pending.push(entry),
        }
    }

    Ok(())
}

/// Classify every check run into `buckets`, one entry per run
pub fn reduce_check_runs(check_runs: &[RawCheckRun], buckets: &mut CheckBuckets) -> Result<()> {
    for run in check_runs {
        let entry = Named::new(&run.name);
        match run.status.parse::<CheckStatus>()? {
            CheckStatus::Queued | CheckStatus::InProgress => buckets.pending.push(entry),
            CheckStatus::Completed => {
                let conclusion = run
                    .conclusion
                    .as_deref()
                    .ok_or_else(|| Error::unexpected(UnexpectedKind::CheckConclusion, "null"))?
                    .parse::<CheckConclusion>()?;
                match conclusion {
                    CheckConclusion::Success | CheckConclusion::Neutral => {
                        buckets.success.push(entry);
                    }
                    CheckConclusion::Failure | CheckConclusion::TimedOut => {
                        buckets.failure.push(entry);
                    }
                    CheckConclusion::Cancelled => buckets.error.push(entry),
                }
            }
        }
    }

    Ok(())
}

/// Reduce both sources into one set of buckets, statuses first
pub fn reduce_checks(statuses: &[RawStatus], check_runs: &[RawCheckRun]) -> Result<CheckBuckets> {
    let mut buckets = CheckBuckets::default();
    reduce_statuses(statuses, &mut buckets)?;
    reduce_check_runs(check_runs, &mut buckets)?;
    Ok(buckets)
}
