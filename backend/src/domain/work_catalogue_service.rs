//! Work catalogue service.
//!
//! Implements the [`WorkCommand`] and [`WorkQuery`] driving ports over the
//! work and vote repositories. Validation always runs before storage is
//! touched, so rejected input never mutates anything.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{VoteRepository, WorkCommand, WorkInput, WorkQuery, WorkRepository};
use crate::domain::{Category, Error, Work, WorkDetails, WorkDraft, WorkId, validate_work_input};

fn work_not_found(id: &WorkId) -> Error {
    Error::not_found(format!("work {id} not found"))
}

fn validate(input: &WorkInput) -> Result<WorkDraft, Error> {
    validate_work_input(input.title.as_deref(), &input.category).map_err(Error::from)
}

/// Service owning work lifecycle rules.
#[derive(Clone)]
pub struct WorkCatalogueService<W, V> {
    works: Arc<W>,
    votes: Arc<V>,
    clock: Arc<dyn Clock>,
}

impl<W, V> WorkCatalogueService<W, V> {
    /// Create the service from its repositories and a clock.
    pub fn new(works: Arc<W>, votes: Arc<V>, clock: Arc<dyn Clock>) -> Self {
        Self {
            works,
            votes,
            clock,
        }
    }
}

#[async_trait]
impl<W, V> WorkCommand for WorkCatalogueService<W, V>
where
    W: WorkRepository,
    V: VoteRepository,
{
    async fn create(&self, input: WorkInput) -> Result<Work, Error> {
        let draft = validate(&input)?;
        let work = Work::new(WorkId::random(), draft, self.clock.utc());

        self.works.insert(&work).await?;

        info!(work_id = %work.id(), category = %work.category(), "work created");
        Ok(work)
    }

    async fn update(&self, id: &WorkId, input: WorkInput) -> Result<Work, Error> {
        let draft = validate(&input)?;
        let existing = self
            .works
            .find_by_id(id)
            .await?
            .ok_or_else(|| work_not_found(id))?;

        let work = existing.revised(draft);
        let updated = self.works.update(&work).await?;
        if !updated {
            return Err(work_not_found(id));
        }

        info!(work_id = %id, category = %work.category(), "work updated");
        Ok(work)
    }

    async fn delete(&self, id: &WorkId) -> Result<(), Error> {
        let deleted = self.works.delete(id).await?;
        if !deleted {
            return Err(work_not_found(id));
        }

        info!(work_id = %id, "work deleted");
        Ok(())
    }
}

#[async_trait]
impl<W, V> WorkQuery for WorkCatalogueService<W, V>
where
    W: WorkRepository,
    V: VoteRepository,
{
    async fn find(&self, id: &WorkId) -> Result<WorkDetails, Error> {
        let work = self
            .works
            .find_by_id(id)
            .await?
            .ok_or_else(|| work_not_found(id))?;
        let vote_count = self.votes.count_for_work(id).await?;

        Ok(WorkDetails { work, vote_count })
    }

    async fn list_by_category(&self, category: Category) -> Result<Vec<Work>, Error> {
        self.works
            .list_by_category(category)
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
#[path = "work_catalogue_service_tests.rs"]
mod tests;
