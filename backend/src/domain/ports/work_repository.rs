//! Driven port for work persistence.

use async_trait::async_trait;

use crate::domain::{Category, Work, WorkId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by work repository adapters.
    pub enum WorkRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "work repository connection failed: {message}"
            as ServiceUnavailable,
        /// Query or mutation failed during execution.
        Query { message: String } => "work repository query failed: {message}" as InternalError,
    }
}

/// Storage for works.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkRepository: Send + Sync {
    /// Persist a new work.
    async fn insert(&self, work: &Work) -> Result<(), WorkRepositoryError>;

    /// Overwrite the title and category of an existing work.
    ///
    /// Returns `false` when no work with that id exists.
    async fn update(&self, work: &Work) -> Result<bool, WorkRepositoryError>;

    /// Remove a work and every vote cast for it in one transaction.
    ///
    /// Returns `false` when no work with that id exists.
    async fn delete(&self, id: &WorkId) -> Result<bool, WorkRepositoryError>;

    /// Find a work by id.
    async fn find_by_id(&self, id: &WorkId) -> Result<Option<Work>, WorkRepositoryError>;

    /// Works in `category`, oldest first.
    async fn list_by_category(&self, category: Category) -> Result<Vec<Work>, WorkRepositoryError>;
}
