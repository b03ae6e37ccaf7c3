//! Votes and upvote outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{IdentityId, VoteId, WorkId};

/// Record that an identity upvoted a work.
///
/// At most one vote exists per `(identity_id, work_id)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: VoteId,
    pub identity_id: IdentityId,
    pub work_id: WorkId,
    pub created_at: DateTime<Utc>,
}

/// Status reported to clients after an upvote attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpvoteStatus {
    Success,
    Failure,
}

/// Result of [`VotingService::upvote`](crate::domain::VotingService::upvote).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpvoteOutcome {
    /// A new vote was stored.
    Recorded { vote: Vote, vote_count: u64 },
    /// The identity had already voted for the work; nothing changed.
    AlreadyVoted { vote_count: u64 },
}

impl UpvoteOutcome {
    /// Message shown after a successful upvote.
    pub const SUCCESS_MESSAGE: &'static str = "Successfully upvoted!";
    /// Message shown after a rejected upvote.
    pub const FAILURE_MESSAGE: &'static str = "Could not upvote";

    #[must_use]
    pub const fn status(&self) -> UpvoteStatus {
        match self {
            Self::Recorded { .. } => UpvoteStatus::Success,
            Self::AlreadyVoted { .. } => UpvoteStatus::Failure,
        }
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Recorded { .. } => Self::SUCCESS_MESSAGE,
            Self::AlreadyVoted { .. } => Self::FAILURE_MESSAGE,
        }
    }

    /// Vote count of the work after the attempt.
    #[must_use]
    pub const fn vote_count(&self) -> u64 {
        match self {
            Self::Recorded { vote_count, .. } | Self::AlreadyVoted { vote_count } => *vote_count,
        }
    }
}
