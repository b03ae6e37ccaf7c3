//! Domain primitives, services, and ports.
//!
//! Purpose: hold the voting and ranking rules independent of HTTP and
//! storage. Inbound adapters call the driving ports in [`ports`]; outbound
//! adapters implement the driven ones.
//!
//! Public surface:
//! - [`Identity`], [`Work`], [`Vote`]: the three records of the data model.
//! - [`WorkCatalogueService`]: validated create/update/delete/find/list.
//! - [`VotingService`]: one vote per identity and work.
//! - [`RankingAggregator`]: per-category rankings ordered by vote count.
//! - [`IdentityService`]: provider sign-in and profile reads.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.

pub mod error;
mod identity;
mod identity_service;
mod ids;
pub mod ports;
pub mod ranking;
mod ranking_aggregator;
mod trace_id;
mod vote;
mod voting_service;
mod work;
mod work_catalogue_service;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::{
    Identity, IdentityValidationError, ProviderLink, ProviderProfile, Username,
};
pub use self::identity_service::IdentityService;
pub use self::ids::{IdParseError, IdentityId, VoteId, WorkId};
pub use self::ranking::{CategoryRanking, WorkTally, rank_works};
pub use self::ranking_aggregator::RankingAggregator;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::vote::{UpvoteOutcome, UpvoteStatus, Vote};
pub use self::voting_service::VotingService;
pub use self::work::{
    BlankTitle, Category, Title, UnknownCategory, Work, WorkDetails, WorkDraft, WorkField,
    WorkValidationErrors, WorkViolation, WorkViolationCode, validate_work_input,
};
pub use self::work_catalogue_service::WorkCatalogueService;

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
