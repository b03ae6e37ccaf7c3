//! Ranking aggregator.
//!
//! Reads per-work tallies through the [`VoteRepository`] and orders them with
//! [`rank_works`]. Every call is a fresh read; nothing is cached.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{RankingQuery, VoteRepository};
use crate::domain::ranking::{rank_works, top_work};
use crate::domain::{Category, CategoryRanking, Error, WorkTally};

/// Service implementing [`RankingQuery`].
#[derive(Clone)]
pub struct RankingAggregator<V> {
    votes: Arc<V>,
}

impl<V> RankingAggregator<V> {
    pub fn new(votes: Arc<V>) -> Self {
        Self { votes }
    }
}

#[async_trait]
impl<V> RankingQuery for RankingAggregator<V>
where
    V: VoteRepository,
{
    async fn rank_by_category(&self, category: Category) -> Result<CategoryRanking, Error> {
        let tallies = self.votes.tally_by_category(category).await?;
        Ok(CategoryRanking {
            category,
            works: rank_works(tallies),
        })
    }

    async fn rank_all(&self) -> Result<Vec<CategoryRanking>, Error> {
        let mut rankings = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            rankings.push(self.rank_by_category(category).await?);
        }
        Ok(rankings)
    }

    async fn top_by_category(&self, limit: usize) -> Result<Vec<CategoryRanking>, Error> {
        let mut rankings = self.rank_all().await?;
        for ranking in &mut rankings {
            ranking.works.truncate(limit);
        }
        Ok(rankings)
    }

    async fn spotlight(&self) -> Result<Option<WorkTally>, Error> {
        let rankings = self.rank_all().await?;
        Ok(top_work(rankings.iter().flat_map(|ranking| ranking.works.iter())).cloned())
    }
}
