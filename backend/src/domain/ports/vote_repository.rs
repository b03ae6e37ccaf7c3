//! Driven port for vote persistence and tallies.
//!
//! Adapters own the transaction boundary for [`VoteRepository::record`]: the
//! existence checks and the insert run together, and the store's unique
//! constraint on `(identity_id, work_id)` decides races.

use async_trait::async_trait;

use crate::domain::{Category, IdentityId, Vote, Work, WorkId, WorkTally};

use super::define_port_error;

define_port_error! {
    /// Errors raised by vote repository adapters.
    pub enum VoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "vote repository connection failed: {message}"
            as ServiceUnavailable,
        /// Query or mutation failed during execution.
        Query { message: String } => "vote repository query failed: {message}" as InternalError,
        /// The voting identity does not exist in storage.
        IdentityMissing { identity_id: IdentityId } => "identity {identity_id} does not exist"
            as NotFound,
    }
}

/// Outcome of attempting to store a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteInsertOutcome {
    /// The vote was stored.
    Recorded,
    /// A vote for the same identity and work already exists.
    AlreadyVoted,
    /// The work no longer exists.
    WorkMissing,
}

/// Storage for votes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Store `vote` unless the identity already voted for the work.
    async fn record(&self, vote: &Vote) -> Result<VoteInsertOutcome, VoteRepositoryError>;

    /// Whether `identity_id` has voted for `work_id`.
    async fn exists(
        &self,
        identity_id: &IdentityId,
        work_id: &WorkId,
    ) -> Result<bool, VoteRepositoryError>;

    /// Number of votes cast for a work.
    async fn count_for_work(&self, work_id: &WorkId) -> Result<u64, VoteRepositoryError>;

    /// Every work in `category` with its vote count, in no particular order.
    async fn tally_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<WorkTally>, VoteRepositoryError>;

    /// Works an identity has voted for, most recent vote first.
    async fn voted_works(&self, identity_id: &IdentityId) -> Result<Vec<Work>, VoteRepositoryError>;
}
