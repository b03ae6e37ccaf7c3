//! Identity service: provider sign-in and profile reads.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    IdentityProfile, IdentityProfileQuery, IdentityRepository, IdentityRepositoryError,
    IdentitySignIn, VoteRepository,
};
use crate::domain::{Error, Identity, IdentityId, ProviderProfile};

/// Service implementing [`IdentitySignIn`] and [`IdentityProfileQuery`].
#[derive(Clone)]
pub struct IdentityService<I, V> {
    identities: Arc<I>,
    votes: Arc<V>,
    clock: Arc<dyn Clock>,
}

impl<I, V> IdentityService<I, V> {
    pub fn new(identities: Arc<I>, votes: Arc<V>, clock: Arc<dyn Clock>) -> Self {
        Self {
            identities,
            votes,
            clock,
        }
    }
}

impl<I, V> IdentityService<I, V>
where
    I: IdentityRepository,
{
    async fn linked_identity(&self, profile: &ProviderProfile) -> Result<Option<Identity>, Error> {
        self.identities
            .find_by_provider(&profile.link)
            .await
            .map_err(Error::from)
    }
}

#[async_trait]
impl<I, V> IdentitySignIn for IdentityService<I, V>
where
    I: IdentityRepository,
    V: VoteRepository,
{
    async fn sign_in(&self, profile: ProviderProfile) -> Result<Identity, Error> {
        if let Some(identity) = self.linked_identity(&profile).await? {
            return Ok(identity);
        }

        let identity =
            Identity::from_profile(IdentityId::random(), profile.clone(), self.clock.utc());
        match self.identities.insert(&identity).await {
            Ok(()) => {
                info!(
                    identity_id = %identity.id(),
                    provider = identity.provider().provider(),
                    "identity created on first sign-in"
                );
                Ok(identity)
            }
            // A concurrent first sign-in for the same account won the insert.
            Err(IdentityRepositoryError::DuplicateProviderLink { .. }) => self
                .linked_identity(&profile)
                .await?
                .ok_or_else(|| Error::internal("provider link vanished during sign-in")),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl<I, V> IdentityProfileQuery for IdentityService<I, V>
where
    I: IdentityRepository,
    V: VoteRepository,
{
    async fn profile(&self, id: &IdentityId) -> Result<IdentityProfile, Error> {
        let identity = self
            .identities
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("identity {id} not found")))?;
        let ranked_works = self.votes.voted_works(id).await?;

        Ok(IdentityProfile {
            identity,
            ranked_works,
        })
    }
}
