//! PostgreSQL-backed [`WorkRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{WorkRepository, WorkRepositoryError};
use crate::domain::{Category, Work, WorkId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CorruptRow, NewWorkRow, WorkRow, WorkUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{votes, works};

/// Diesel implementation of the work repository port.
#[derive(Clone)]
pub struct DieselWorkRepository {
    pool: DbPool,
}

impl DieselWorkRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> WorkRepositoryError {
    map_basic_pool_error(error, WorkRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> WorkRepositoryError {
    map_basic_diesel_error(
        error,
        WorkRepositoryError::query,
        WorkRepositoryError::connection,
    )
}

fn map_corrupt_row(error: CorruptRow) -> WorkRepositoryError {
    WorkRepositoryError::query(error.to_string())
}

#[async_trait]
impl WorkRepository for DieselWorkRepository {
    async fn insert(&self, work: &Work) -> Result<(), WorkRepositoryError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        diesel::insert_into(works::table)
            .values(NewWorkRow::from(work))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update(&self, work: &Work) -> Result<bool, WorkRepositoryError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        let updated = diesel::update(works::table.find(work.id().as_uuid()))
            .set(WorkUpdate::from(work))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &WorkId) -> Result<bool, WorkRepositoryError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        let work_id = *id.as_uuid();
        let deleted: usize = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(votes::table.filter(votes::work_id.eq(work_id)))
                        .execute(conn)
                        .await?;
                    diesel::delete(works::table.find(work_id))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn find_by_id(&self, id: &WorkId) -> Result<Option<Work>, WorkRepositoryError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        let row = works::table
            .find(id.as_uuid())
            .select(WorkRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Work::try_from).transpose().map_err(map_corrupt_row)
    }

    async fn list_by_category(&self, category: Category) -> Result<Vec<Work>, WorkRepositoryError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        let rows: Vec<WorkRow> = works::table
            .filter(works::category.eq(category.as_str()))
            .order((works::created_at.asc(), works::id.asc()))
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
