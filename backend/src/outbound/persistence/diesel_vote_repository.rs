//! PostgreSQL-backed [`VoteRepository`].
//!
//! `record` runs the work check, the duplicate check, and the insert in one
//! transaction. Under concurrent requests the `votes_identity_work_unique`
//! constraint is the final arbiter; its violation is reported as
//! [`VoteInsertOutcome::AlreadyVoted`].

use async_trait::async_trait;
use diesel::dsl::{count, exists};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{VoteInsertOutcome, VoteRepository, VoteRepositoryError};
use crate::domain::{Category, IdentityId, Vote, Work, WorkId, WorkTally};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, VOTES_IDENTITY_FK, VOTES_IDENTITY_WORK_UNIQUE, VOTES_WORK_FK,
    constraint_violation, map_basic_diesel_error, map_basic_pool_error, warn_unrecognised,
};
use super::models::{CorruptRow, NewVoteRow, WorkRow};
use super::pool::{DbPool, PoolError};
use super::schema::{votes, works};

/// Diesel implementation of the vote repository port.
#[derive(Clone)]
pub struct DieselVoteRepository {
    pool: DbPool,
}

impl DieselVoteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VoteRepositoryError {
    map_basic_pool_error(error, VoteRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> VoteRepositoryError {
    map_basic_diesel_error(
        error,
        VoteRepositoryError::query,
        VoteRepositoryError::connection,
    )
}

fn map_corrupt_row(error: CorruptRow) -> VoteRepositoryError {
    VoteRepositoryError::query(error.to_string())
}

fn to_count(raw: i64) -> Result<u64, VoteRepositoryError> {
    u64::try_from(raw).map_err(|_| VoteRepositoryError::query(format!("negative vote count {raw}")))
}

/// Resolve a failed vote insert into an outcome where the failure has a
/// domain meaning.
fn map_record_error(
    error: DieselError,
    vote: &Vote,
) -> Result<VoteInsertOutcome, VoteRepositoryError> {
    match constraint_violation(&error) {
        Some(ConstraintViolation::Unique(Some(VOTES_IDENTITY_WORK_UNIQUE))) => {
            debug!(
                identity_id = %vote.identity_id,
                work_id = %vote.work_id,
                "concurrent duplicate vote"
            );
            Ok(VoteInsertOutcome::AlreadyVoted)
        }
        Some(ConstraintViolation::ForeignKey(Some(VOTES_WORK_FK))) => {
            Ok(VoteInsertOutcome::WorkMissing)
        }
        Some(ConstraintViolation::ForeignKey(Some(VOTES_IDENTITY_FK))) => {
            Err(VoteRepositoryError::identity_missing(vote.identity_id))
        }
        Some(violation) => {
            warn_unrecognised(violation, "record vote");
            Err(map_diesel_error(error))
        }
        None => Err(map_diesel_error(error)),
    }
}

#[async_trait]
impl VoteRepository for DieselVoteRepository {
    async fn record(&self, vote: &Vote) -> Result<VoteInsertOutcome, VoteRepositoryError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        let row = NewVoteRow::from(vote);

        let result: Result<VoteInsertOutcome, DieselError> = conn
            .transaction(|conn| {
                async move {
                    let work_exists: bool =
                        diesel::select(exists(works::table.find(row.work_id)))
                            .get_result(conn)
                            .await?;
                    if !work_exists {
                        return Ok(VoteInsertOutcome::WorkMissing);
                    }

                    let already_voted: bool = diesel::select(exists(
                        votes::table
                            .filter(votes::identity_id.eq(row.identity_id))
                            .filter(votes::work_id.eq(row.work_id)),
                    ))
                    .get_result(conn)
                    .await?;
                    if already_voted {
                        return Ok(VoteInsertOutcome::AlreadyVoted);
                    }

                    diesel::insert_into(votes::table)
                        .values(&row)
                        .execute(conn)
                        .await?;
                    Ok(VoteInsertOutcome::Recorded)
                }
                .scope_boxed()
            })
            .await;

        match result {
            Ok(outcome) => Ok(outcome),
            Err(error) => map_record_error(error, vote),
        }
    }

    async fn exists(
        &self,
        identity_id: &IdentityId,
        work_id: &WorkId,
    ) -> Result<bool, VoteRepositoryError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        diesel::select(exists(
            votes::table
                .filter(votes::identity_id.eq(identity_id.as_uuid()))
                .filter(votes::work_id.eq(work_id.as_uuid())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn count_for_work(&self, work_id: &WorkId) -> Result<u64, VoteRepositoryError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        let total: i64 = votes::table
            .filter(votes::work_id.eq(work_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_count(total)
    }

    async fn tally_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<WorkTally>, VoteRepositoryError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        let rows: Vec<(WorkRow, i64)> = works::table
            .left_join(votes::table)
            .filter(works::category.eq(category.as_str()))
            .group_by(works::id)
            .select((WorkRow::as_select(), count(votes::id.nullable())))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(row, total)| {
                Ok(WorkTally {
                    work: Work::try_from(row).map_err(map_corrupt_row)?,
                    vote_count: to_count(total)?,
                })
            })
            .collect()
    }

    async fn voted_works(
        &self,
        identity_id: &IdentityId,
    ) -> Result<Vec<Work>, VoteRepositoryError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        let rows: Vec<WorkRow> = votes::table
            .inner_join(works::table)
            .filter(votes::identity_id.eq(identity_id.as_uuid()))
            .order(votes::created_at.desc())
            .select(WorkRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(Work::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_corrupt_row)
    }
}
