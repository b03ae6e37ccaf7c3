//! Diesel error mapping shared by the repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use super::pool::PoolError;

/// Unique constraint on `votes (identity_id, work_id)`.
pub(crate) const VOTES_IDENTITY_WORK_UNIQUE: &str = "votes_identity_work_unique";
/// Foreign key from `votes.identity_id` to `identities.id`.
pub(crate) const VOTES_IDENTITY_FK: &str = "votes_identity_id_fkey";
/// Foreign key from `votes.work_id` to `works.id`.
pub(crate) const VOTES_WORK_FK: &str = "votes_work_id_fkey";
/// Unique constraint on `identities.username`.
pub(crate) const IDENTITIES_USERNAME_UNIQUE: &str = "identities_username_unique";
/// Unique constraint on `identities (provider, uid)`.
pub(crate) const IDENTITIES_PROVIDER_UID_UNIQUE: &str = "identities_provider_uid_unique";

/// A constraint the database refused a write over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstraintViolation<'a> {
    Unique(Option<&'a str>),
    ForeignKey(Option<&'a str>),
}

/// Classify unique and foreign key violations; `None` for anything else.
pub(crate) fn constraint_violation(error: &DieselError) -> Option<ConstraintViolation<'_>> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            Some(ConstraintViolation::Unique(info.constraint_name()))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            Some(ConstraintViolation::ForeignKey(info.constraint_name()))
        }
        _ => None,
    }
}

/// Log a constraint violation the caller has no specific mapping for.
pub(crate) fn warn_unrecognised(violation: ConstraintViolation<'_>, operation: &str) {
    warn!(
        ?violation,
        operation, "unrecognised constraint violation; may need specific error mapping"
    );
}

/// Map pool errors into a repository-specific connection error.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.message().to_owned())
}

/// Map Diesel errors into repository-specific query or connection errors.
///
/// Only the error category reaches the domain; details go to the debug log.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::BrokenTransactionManager => connection("database transaction manager broken"),
        _ => query("database error"),
    }
}
