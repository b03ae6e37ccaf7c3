//! Voting service.
//!
//! Enforces one vote per `(identity, work)` pair. The pre-insert existence
//! check only avoids a pointless write; the repository's transactional insert
//! and the store's unique constraint are what guarantee the invariant under
//! concurrent requests.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{UpvoteCommand, VoteInsertOutcome, VoteRepository, WorkRepository};
use crate::domain::{Error, IdentityId, UpvoteOutcome, Vote, VoteId, WorkId};

fn work_not_found(id: &WorkId) -> Error {
    Error::not_found(format!("work {id} not found"))
}

/// Service implementing [`UpvoteCommand`].
#[derive(Clone)]
pub struct VotingService<W, V> {
    works: Arc<W>,
    votes: Arc<V>,
    clock: Arc<dyn Clock>,
}

impl<W, V> VotingService<W, V> {
    /// Create the service from its repositories and a clock.
    pub fn new(works: Arc<W>, votes: Arc<V>, clock: Arc<dyn Clock>) -> Self {
        Self {
            works,
            votes,
            clock,
        }
    }
}

impl<W, V> VotingService<W, V>
where
    W: WorkRepository,
    V: VoteRepository,
{
    async fn vote_count(&self, work_id: &WorkId) -> Result<u64, Error> {
        self.votes
            .count_for_work(work_id)
            .await
            .map_err(Error::from)
    }

    async fn already_voted(
        &self,
        identity_id: &IdentityId,
        work_id: &WorkId,
    ) -> Result<UpvoteOutcome, Error> {
        debug!(%identity_id, %work_id, "upvote rejected: already voted");
        Ok(UpvoteOutcome::AlreadyVoted {
            vote_count: self.vote_count(work_id).await?,
        })
    }

    /// Cast one vote for `work_id` on behalf of `identity_id`.
    ///
    /// # Errors
    /// - `not_found` when the work (or, at insert time, the identity) does
    ///   not exist.
    /// - `service_unavailable` / `internal_error` for storage failures.
    pub async fn upvote(
        &self,
        identity_id: &IdentityId,
        work_id: &WorkId,
    ) -> Result<UpvoteOutcome, Error> {
        self.works
            .find_by_id(work_id)
            .await?
            .ok_or_else(|| work_not_found(work_id))?;

        let exists = self.votes.exists(identity_id, work_id).await?;
        if exists {
            return self.already_voted(identity_id, work_id).await;
        }

        let vote = Vote {
            id: VoteId::random(),
            identity_id: *identity_id,
            work_id: *work_id,
            created_at: self.clock.utc(),
        };
        let outcome = self.votes.record(&vote).await?;

        match outcome {
            VoteInsertOutcome::Recorded => {
                let vote_count = self.vote_count(work_id).await?;
                info!(%identity_id, %work_id, vote_id = %vote.id, vote_count, "vote recorded");
                Ok(UpvoteOutcome::Recorded { vote, vote_count })
            }
            VoteInsertOutcome::AlreadyVoted => self.already_voted(identity_id, work_id).await,
            VoteInsertOutcome::WorkMissing => Err(work_not_found(work_id)),
        }
    }
}

#[async_trait]
impl<W, V> UpvoteCommand for VotingService<W, V>
where
    W: WorkRepository,
    V: VoteRepository,
{
    async fn upvote(
        &self,
        identity_id: &IdentityId,
        work_id: &WorkId,
    ) -> Result<UpvoteOutcome, Error> {
        Self::upvote(self, identity_id, work_id).await
    }
}

#[cfg(test)]
#[path = "voting_service_tests.rs"]
mod tests;
