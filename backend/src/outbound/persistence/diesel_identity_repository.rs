//! PostgreSQL-backed [`IdentityRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{IdentityRepository, IdentityRepositoryError};
use crate::domain::{Identity, IdentityId, ProviderLink};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, IDENTITIES_PROVIDER_UID_UNIQUE, IDENTITIES_USERNAME_UNIQUE,
    constraint_violation, map_basic_diesel_error, map_basic_pool_error, warn_unrecognised,
};
use super::models::{CorruptRow, IdentityRow, NewIdentityRow};
use super::pool::{DbPool, PoolError};
use super::schema::identities;

/// Diesel implementation of the identity repository port.
#[derive(Clone)]
pub struct DieselIdentityRepository {
    pool: DbPool,
}

impl DieselIdentityRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> IdentityRepositoryError {
    map_basic_pool_error(error, IdentityRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> IdentityRepositoryError {
    map_basic_diesel_error(
        error,
        IdentityRepositoryError::query,
        IdentityRepositoryError::connection,
    )
}

fn map_corrupt_row(error: CorruptRow) -> IdentityRepositoryError {
    IdentityRepositoryError::query(error.to_string())
}

fn map_insert_error(error: DieselError, identity: &Identity) -> IdentityRepositoryError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::Unique(Some(IDENTITIES_USERNAME_UNIQUE))) => {
            IdentityRepositoryError::duplicate_username(identity.username().as_str())
        }
        Some(ConstraintViolation::Unique(Some(IDENTITIES_PROVIDER_UID_UNIQUE))) => {
            let link = identity.provider();
            IdentityRepositoryError::duplicate_provider_link(link.provider(), link.uid())
        }
        Some(violation) => {
            warn_unrecognised(violation, "insert identity");
            map_diesel_error(error)
        }
        None => map_diesel_error(error),
    }
}

#[async_trait]
impl IdentityRepository for DieselIdentityRepository {
    async fn insert(&self, identity: &Identity) -> Result<(), IdentityRepositoryError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        diesel::insert_into(identities::table)
            .values(NewIdentityRow::from(identity))
            .execute(&mut conn)
            .await
            .map_err(|error| map_insert_error(error, identity))?;
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &IdentityId,
    ) -> Result<Option<Identity>, IdentityRepositoryError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        let row = identities::table
            .find(id.as_uuid())
            .select(IdentityRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Identity::try_from)
            .transpose()
            .map_err(map_corrupt_row)
    }

    async fn find_by_provider(
        &self,
        link: &ProviderLink,
    ) -> Result<Option<Identity>, IdentityRepositoryError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        let row = identities::table
            .filter(identities::provider.eq(link.provider()))
            .filter(identities::uid.eq(link.uid()))
            .select(IdentityRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Identity::try_from)
            .transpose()
            .map_err(map_corrupt_row)
    }
}
