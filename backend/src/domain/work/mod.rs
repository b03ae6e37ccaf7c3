//! Creative works and their categories.

mod validation;

pub use validation::{
    WorkField, WorkValidationErrors, WorkViolation, WorkViolationCode, validate_work_input,
};

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::WorkId;

/// Closed set of categories a work can belong to.
///
/// Parsing is exact and case-sensitive: `"album"` is accepted, `"Album"`,
/// `"albums"`, and `" album"` are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Book,
    Album,
    Movie,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Self; 3] = [Self::Book, Self::Album, Self::Movie];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Album => "album",
            Self::Movie => "movie",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when text does not name a known category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {value:?}")]
pub struct UnknownCategory {
    value: String,
}

impl UnknownCategory {
    /// The rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| UnknownCategory {
                value: value.to_owned(),
            })
    }
}

/// Work title that is not blank. Stored exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Title(String);

/// Raised when a title is empty or only whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("title must not be blank")]
pub struct BlankTitle;

impl Title {
    /// Validate and construct a title.
    pub fn new(value: impl Into<String>) -> Result<Self, BlankTitle> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(BlankTitle);
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Title {
    type Error = BlankTitle;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Title> for String {
    fn from(value: Title) -> Self {
        value.0
    }
}

/// Validated title and category, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDraft {
    pub title: Title,
    pub category: Category,
}

/// A submitted creative work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    id: WorkId,
    title: Title,
    category: Category,
    created_at: DateTime<Utc>,
}

impl Work {
    #[must_use]
    pub fn new(id: WorkId, draft: WorkDraft, created_at: DateTime<Utc>) -> Self {
        let WorkDraft { title, category } = draft;
        Self {
            id,
            title,
            category,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> WorkId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &Title {
        &self.title
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the title and category, keeping identity and creation time.
    #[must_use]
    pub fn revised(self, draft: WorkDraft) -> Self {
        Self::new(self.id, draft, self.created_at)
    }
}

/// A work together with its current vote count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkDetails {
    #[serde(flatten)]
    pub work: Work,
    pub vote_count: u64,
}
