//! Internal Diesel row structs.
//!
//! Never exposed to the domain; conversions live here so adapters stay thin.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{identities, votes, works};
use crate::domain::{
    Category, Identity, IdentityId, ProviderLink, Title, Username, Vote, Work, WorkDraft, WorkId,
};

/// Raised when a stored row violates a domain invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stored {table} row {id} is invalid: {reason}")]
pub(crate) struct CorruptRow {
    table: &'static str,
    id: Uuid,
    reason: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = identities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IdentityRow {
    pub id: Uuid,
    pub username: String,
    pub provider: String,
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<IdentityRow> for Identity {
    type Error = CorruptRow;

    fn try_from(row: IdentityRow) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| CorruptRow {
            table: "identities",
            id: row.id,
            reason,
        };
        let username = Username::new(row.username.clone()).map_err(|err| corrupt(err.to_string()))?;
        let link = ProviderLink::new(row.provider.clone(), row.uid.clone())
            .map_err(|err| corrupt(err.to_string()))?;
        Ok(Self::from_parts(
            IdentityId::from_uuid(row.id),
            username,
            link,
            row.display_name,
            row.email,
            row.created_at,
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = identities)]
pub(crate) struct NewIdentityRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub provider: &'a str,
    pub uid: &'a str,
    pub display_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Identity> for NewIdentityRow<'a> {
    fn from(identity: &'a Identity) -> Self {
        Self {
            id: *identity.id().as_uuid(),
            username: identity.username().as_str(),
            provider: identity.provider().provider(),
            uid: identity.provider().uid(),
            display_name: identity.display_name(),
            email: identity.email(),
            created_at: identity.created_at(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = works)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WorkRow {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<WorkRow> for Work {
    type Error = CorruptRow;

    fn try_from(row: WorkRow) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| CorruptRow {
            table: "works",
            id: row.id,
            reason,
        };
        let title = Title::new(row.title.clone()).map_err(|err| corrupt(err.to_string()))?;
        let category = row
            .category
            .parse::<Category>()
            .map_err(|err| corrupt(err.to_string()))?;
        Ok(Self::new(
            WorkId::from_uuid(row.id),
            WorkDraft { title, category },
            row.created_at,
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = works)]
pub(crate) struct NewWorkRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub category: &'static str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Work> for NewWorkRow<'a> {
    fn from(work: &'a Work) -> Self {
        Self {
            id: *work.id().as_uuid(),
            title: work.title().as_str(),
            category: work.category().as_str(),
            created_at: work.created_at(),
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = works)]
pub(crate) struct WorkUpdate<'a> {
    pub title: &'a str,
    pub category: &'static str,
}

impl<'a> From<&'a Work> for WorkUpdate<'a> {
    fn from(work: &'a Work) -> Self {
        Self {
            title: work.title().as_str(),
            category: work.category().as_str(),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = votes)]
pub(crate) struct NewVoteRow {
    pub id: Uuid,
    pub identity_id: Uuid,
    pub work_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<&Vote> for NewVoteRow {
    fn from(vote: &Vote) -> Self {
        Self {
            id: *vote.id.as_uuid(),
            identity_id: *vote.identity_id.as_uuid(),
            work_id: *vote.work_id.as_uuid(),
            created_at: vote.created_at,
        }
    }
}
