//! Authenticated identities.
//!
//! An identity is created the first time someone signs in through an external
//! provider and is never mutated by the voting subsystem afterwards.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::IdentityId;

/// Validation errors for identity fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("provider name must not be empty")]
    EmptyProvider,
    #[error("provider uid must not be empty")]
    EmptyProviderUid,
}

/// Unique public handle of an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a username. Surrounding whitespace is removed.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(IdentityValidationError::EmptyUsername);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the username text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = IdentityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Link between an identity and the external provider account that created it.
///
/// The `(provider, uid)` pair is unique across identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderLink {
    provider: String,
    uid: String,
}

impl ProviderLink {
    /// Validate and construct a provider link.
    pub fn new(
        provider: impl Into<String>,
        uid: impl Into<String>,
    ) -> Result<Self, IdentityValidationError> {
        let provider = provider.into();
        let uid = uid.into();
        if provider.trim().is_empty() {
            return Err(IdentityValidationError::EmptyProvider);
        }
        if uid.trim().is_empty() {
            return Err(IdentityValidationError::EmptyProviderUid);
        }
        Ok(Self { provider, uid })
    }

    /// Provider name, for example `github`.
    #[must_use]
    pub fn provider(&self) -> &str {
        self.provider.as_str()
    }

    /// Provider-issued account identifier.
    #[must_use]
    pub fn uid(&self) -> &str {
        self.uid.as_str()
    }
}

/// Profile data supplied by an external provider at sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub link: ProviderLink,
    pub username: Username,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// Authenticated account able to submit works and vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    id: IdentityId,
    username: Username,
    provider: ProviderLink,
    display_name: Option<String>,
    email: Option<String>,
    created_at: DateTime<Utc>,
}

impl Identity {
    /// Build an identity from a provider profile.
    #[must_use]
    pub fn from_profile(
        id: IdentityId,
        profile: ProviderProfile,
        created_at: DateTime<Utc>,
    ) -> Self {
        let ProviderProfile {
            link,
            username,
            display_name,
            email,
        } = profile;
        Self {
            id,
            username,
            provider: link,
            display_name,
            email,
            created_at,
        }
    }

    /// Rehydrate an identity from storage.
    #[must_use]
    pub fn from_parts(
        id: IdentityId,
        username: Username,
        provider: ProviderLink,
        display_name: Option<String>,
        email: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            provider,
            display_name,
            email,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> IdentityId {
        self.id
    }

    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    #[must_use]
    pub fn provider(&self) -> &ProviderLink {
        &self.provider
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
