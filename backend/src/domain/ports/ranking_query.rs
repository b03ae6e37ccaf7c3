//! Driving port for reading rankings.

use async_trait::async_trait;

use crate::domain::{Category, CategoryRanking, Error, WorkTally};

/// Read-only ranking views.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RankingQuery: Send + Sync {
    /// Every work in `category`, best first.
    async fn rank_by_category(&self, category: Category) -> Result<CategoryRanking, Error>;

    /// One ranking per category, in [`Category::ALL`] order, including empty
    /// categories.
    async fn rank_all(&self) -> Result<Vec<CategoryRanking>, Error>;

    /// Like [`RankingQuery::rank_all`] with each ranking cut to `limit` works.
    async fn top_by_category(&self, limit: usize) -> Result<Vec<CategoryRanking>, Error>;

    /// The single best work across all categories.
    async fn spotlight(&self) -> Result<Option<WorkTally>, Error>;
}
