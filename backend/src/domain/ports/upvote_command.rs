//! Driving port for casting votes.

use async_trait::async_trait;

use crate::domain::{Error, IdentityId, UpvoteOutcome, WorkId};

/// Cast an upvote on behalf of an authenticated identity.
///
/// The identity is always passed explicitly; adapters must refuse anonymous
/// callers before reaching this port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpvoteCommand: Send + Sync {
    /// Record one vote for `(identity_id, work_id)` unless one already exists.
    async fn upvote(&self, identity_id: &IdentityId, work_id: &WorkId)
    -> Result<UpvoteOutcome, Error>;
}
