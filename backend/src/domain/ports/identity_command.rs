//! Driving ports for identities: provider sign-in and profile reads.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Error, Identity, IdentityId, ProviderProfile, Work};

/// Identity together with the works it has voted for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProfile {
    pub identity: Identity,
    pub ranked_works: Vec<Work>,
}

/// Resolve an external-provider sign-in to a local identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentitySignIn: Send + Sync {
    /// Return the identity linked to the provider account, creating it on
    /// first sign-in.
    async fn sign_in(&self, profile: ProviderProfile) -> Result<Identity, Error>;
}

/// Read an identity's profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProfileQuery: Send + Sync {
    /// Profile of `id`; `not_found` when it does not exist.
    async fn profile(&self, id: &IdentityId) -> Result<IdentityProfile, Error>;
}
