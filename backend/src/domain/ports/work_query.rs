//! Driving port for reading works.

use async_trait::async_trait;

use crate::domain::{Category, Error, Work, WorkDetails, WorkId};

/// Read access to works.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkQuery: Send + Sync {
    /// Find a work with its current vote count.
    async fn find(&self, id: &WorkId) -> Result<WorkDetails, Error>;

    /// Works in a category.
    async fn list_by_category(&self, category: Category) -> Result<Vec<Work>, Error>;
}
