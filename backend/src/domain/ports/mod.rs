//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`IdentitySignIn`]) are called by
//! inbound adapters. Driven ports (`*Repository`) are implemented by outbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod identity_command;
mod identity_repository;
mod ranking_query;
mod upvote_command;
mod vote_repository;
mod work_command;
mod work_query;
mod work_repository;

#[cfg(test)]
pub use identity_command::{MockIdentityProfileQuery, MockIdentitySignIn};
pub use identity_command::{IdentityProfile, IdentityProfileQuery, IdentitySignIn};
#[cfg(test)]
pub use identity_repository::MockIdentityRepository;
pub use identity_repository::{IdentityRepository, IdentityRepositoryError};
#[cfg(test)]
pub use ranking_query::MockRankingQuery;
pub use ranking_query::RankingQuery;
#[cfg(test)]
pub use upvote_command::MockUpvoteCommand;
pub use upvote_command::UpvoteCommand;
#[cfg(test)]
pub use vote_repository::MockVoteRepository;
pub use vote_repository::{VoteInsertOutcome, VoteRepository, VoteRepositoryError};
#[cfg(test)]
pub use work_command::MockWorkCommand;
pub use work_command::{WorkCommand, WorkInput};
#[cfg(test)]
pub use work_query::MockWorkQuery;
pub use work_query::WorkQuery;
#[cfg(test)]
pub use work_repository::MockWorkRepository;
pub use work_repository::{WorkRepository, WorkRepositoryError};
