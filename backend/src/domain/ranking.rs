//! Count-based ordering of works.
//!
//! Works are ranked by vote count, highest first. Ties go to the older work,
//! then to the lower id, so a ranking never depends on storage order.

use std::cmp::Ordering;

use serde::Serialize;

use super::{Category, Work};

/// A work with the number of votes it has received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkTally {
    pub work: Work,
    pub vote_count: u64,
}

/// Works of one category in ranked order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRanking {
    pub category: Category,
    pub works: Vec<WorkTally>,
}

fn compare(a: &WorkTally, b: &WorkTally) -> Ordering {
    b.vote_count
        .cmp(&a.vote_count)
        .then_with(|| a.work.created_at().cmp(&b.work.created_at()))
        .then_with(|| a.work.id().cmp(&b.work.id()))
}

/// Sort tallies into ranking order.
#[must_use]
pub fn rank_works(mut tallies: Vec<WorkTally>) -> Vec<WorkTally> {
    tallies.sort_by(compare);
    tallies
}

/// Highest-ranked tally across any number of rankings.
#[must_use]
pub fn top_work<'a>(tallies: impl IntoIterator<Item = &'a WorkTally>) -> Option<&'a WorkTally> {
    tallies.into_iter().min_by(|a, b| compare(a, b))
}
