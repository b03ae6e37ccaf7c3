//! Driving port for work mutations.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{Error, Work, WorkId};

/// Raw work fields as submitted by a client.
///
/// `title` may be absent and `category` may be any text; both are validated
/// by the service before anything is stored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: String,
}

impl WorkInput {
    pub fn new(title: Option<&str>, category: &str) -> Self {
        Self {
            title: title.map(str::to_owned),
            category: category.to_owned(),
        }
    }
}

/// Create, update, and delete works.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkCommand: Send + Sync {
    /// Validate and store a new work with zero votes.
    async fn create(&self, input: WorkInput) -> Result<Work, Error>;

    /// Validate and apply new fields to an existing work.
    async fn update(&self, id: &WorkId, input: WorkInput) -> Result<Work, Error>;

    /// Remove a work and its votes.
    async fn delete(&self, id: &WorkId) -> Result<(), Error>;
}
