//! In-process store implementing every driven port.
//!
//! Used when no database is configured and by HTTP tests. All tables sit
//! behind one mutex so each port call is a single critical section, which
//! gives vote recording the same all-or-nothing behaviour as the Diesel
//! transaction.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    IdentityRepository, IdentityRepositoryError, VoteInsertOutcome, VoteRepository,
    VoteRepositoryError, WorkRepository, WorkRepositoryError,
};
use crate::domain::{Category, Identity, IdentityId, ProviderLink, Vote, Work, WorkId, WorkTally};

#[derive(Debug, Default)]
struct Tables {
    identities: Vec<Identity>,
    works: Vec<Work>,
    votes: Vec<Vote>,
}

impl Tables {
    fn count_votes(&self, work_id: &WorkId) -> u64 {
        self.votes.iter().filter(|v| v.work_id == *work_id).count() as u64
    }
}

/// Shared in-memory store. Clones share the same tables.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|err| err.into_inner())
    }

    /// Remove an identity and cascade to its votes.
    pub fn remove_identity(&self, id: &IdentityId) -> bool {
        let mut tables = self.lock();
        let before = tables.identities.len();
        tables.identities.retain(|identity| identity.id() != *id);
        tables.votes.retain(|vote| vote.identity_id != *id);
        tables.identities.len() != before
    }

    /// Total number of stored votes.
    pub fn vote_total(&self) -> usize {
        self.lock().votes.len()
    }

    pub fn work_total(&self) -> usize {
        self.lock().works.len()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryStore {
    async fn insert(&self, identity: &Identity) -> Result<(), IdentityRepositoryError> {
        let mut tables = self.lock();
        if tables
            .identities
            .iter()
            .any(|existing| existing.username() == identity.username())
        {
            return Err(IdentityRepositoryError::duplicate_username(
                identity.username().as_str(),
            ));
        }
        if tables
            .identities
            .iter()
            .any(|existing| existing.provider() == identity.provider())
        {
            return Err(IdentityRepositoryError::duplicate_provider_link(
                identity.provider().provider(),
                identity.provider().uid(),
            ));
        }
        tables.identities.push(identity.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &IdentityId,
    ) -> Result<Option<Identity>, IdentityRepositoryError> {
        Ok(self
            .lock()
            .identities
            .iter()
            .find(|identity| identity.id() == *id)
            .cloned())
    }

    async fn find_by_provider(
        &self,
        link: &ProviderLink,
    ) -> Result<Option<Identity>, IdentityRepositoryError> {
        Ok(self
            .lock()
            .identities
            .iter()
            .find(|identity| identity.provider() == link)
            .cloned())
    }
}

#[async_trait]
impl WorkRepository for InMemoryStore {
    async fn insert(&self, work: &Work) -> Result<(), WorkRepositoryError> {
        let mut tables = self.lock();
        if tables.works.iter().any(|existing| existing.id() == work.id()) {
            return Err(WorkRepositoryError::query(format!(
                "work {} already exists",
                work.id()
            )));
        }
        tables.works.push(work.clone());
        Ok(())
    }

    async fn update(&self, work: &Work) -> Result<bool, WorkRepositoryError> {
        let mut tables = self.lock();
        let Some(slot) = tables
            .works
            .iter_mut()
            .find(|existing| existing.id() == work.id())
        else {
            return Ok(false);
        };
        *slot = work.clone();
        Ok(true)
    }

    async fn delete(&self, id: &WorkId) -> Result<bool, WorkRepositoryError> {
        let mut tables = self.lock();
        let before = tables.works.len();
        tables.votes.retain(|vote| vote.work_id != *id);
        tables.works.retain(|work| work.id() != *id);
        Ok(tables.works.len() != before)
    }

    async fn find_by_id(&self, id: &WorkId) -> Result<Option<Work>, WorkRepositoryError> {
        Ok(self
            .lock()
            .works
            .iter()
            .find(|work| work.id() == *id)
            .cloned())
    }

    async fn list_by_category(&self, category: Category) -> Result<Vec<Work>, WorkRepositoryError> {
        Ok(self
            .lock()
            .works
            .iter()
            .filter(|work| work.category() == category)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl VoteRepository for InMemoryStore {
    async fn record(&self, vote: &Vote) -> Result<VoteInsertOutcome, VoteRepositoryError> {
        let mut tables = self.lock();
        if !tables.works.iter().any(|work| work.id() == vote.work_id) {
            return Ok(VoteInsertOutcome::WorkMissing);
        }
        if !tables
            .identities
            .iter()
            .any(|identity| identity.id() == vote.identity_id)
        {
            return Err(VoteRepositoryError::identity_missing(vote.identity_id));
        }
        if tables
            .votes
            .iter()
            .any(|v| v.identity_id == vote.identity_id && v.work_id == vote.work_id)
        {
            return Ok(VoteInsertOutcome::AlreadyVoted);
        }
        tables.votes.push(*vote);
        Ok(VoteInsertOutcome::Recorded)
    }

    async fn exists(
        &self,
        identity_id: &IdentityId,
        work_id: &WorkId,
    ) -> Result<bool, VoteRepositoryError> {
        Ok(self
            .lock()
            .votes
            .iter()
            .any(|v| v.identity_id == *identity_id && v.work_id == *work_id))
    }

    async fn count_for_work(&self, work_id: &WorkId) -> Result<u64, VoteRepositoryError> {
        Ok(self.lock().count_votes(work_id))
    }

    async fn tally_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<WorkTally>, VoteRepositoryError> {
        let tables = self.lock();
        Ok(tables
            .works
            .iter()
            .filter(|work| work.category() == category)
            .map(|work| WorkTally {
                work: work.clone(),
                vote_count: tables.count_votes(&work.id()),
            })
            .collect())
    }

    async fn voted_works(
        &self,
        identity_id: &IdentityId,
    ) -> Result<Vec<Work>, VoteRepositoryError> {
        let tables = self.lock();
        let mut votes: Vec<&Vote> = tables
            .votes
            .iter()
            .filter(|vote| vote.identity_id == *identity_id)
            .collect();
        votes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(votes
            .into_iter()
            .filter_map(|vote| tables.works.iter().find(|work| work.id() == vote.work_id))
            .cloned()
            .collect())
    }
}
