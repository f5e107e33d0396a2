//! Review reduction - latest review per author, plus pending requests

use super::latest_by_key;
use crate::error::Result;
use crate::types::{Named, RawReview, ReviewRequest, ReviewState};

/// Reviews classified into disjoint buckets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewBuckets {
    /// Authors whose latest review approved
    pub approved: Vec<Named>,
    /// Authors whose latest review requested changes
    pub requested_changes: Vec<Named>,
    /// Users and teams with an open review request
    pub pending: Vec<Named>,
}

/// Reduce raw reviews and review requests into buckets
///
/// Each author is represented by their review with the highest ID. Comment-only
/// reviews never take part in that selection, so a comment cannot hide an earlier
/// approval. A dismissal does take part, and hides anything before it.
///
/// Pending requests are not cross-checked against reviews: a reviewer can be
/// re-requested after reviewing and show up in both places.
pub fn reduce_reviews(
    reviews: &[RawReview],
    requested_teams: &[ReviewRequest],
    requested_users: &[ReviewRequest],
) -> Result<ReviewBuckets> {
    let mut buckets = ReviewBuckets::default();

    let latest = latest_by_key(
        reviews.iter().filter(|review| review.state != "COMMENTED"),
        RawReview::author_name,
        |candidate, current| candidate.id > current.id,
    );

    for review in latest {
        let name = review.author_name();
        match review.state.parse::<ReviewState>()? {
            ReviewState::Approved => buckets.approved.push(Named::new(name)),
            ReviewState::ChangesRequested => buckets.requested_changes.push(Named::new(name)),
            ReviewState::Dismissed | ReviewState::Commented => {}
        }
    }

    buckets.pending = requested_teams
        .iter()
        .chain(requested_users)
        .map(|request| Named::new(&request.name))
        .collect();

    Ok(buckets)
}
