//! Driven port for identity persistence.

use async_trait::async_trait;

use crate::domain::{Identity, IdentityId, ProviderLink};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity repository adapters.
    pub enum IdentityRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "identity repository connection failed: {message}" as ServiceUnavailable,
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "identity repository query failed: {message}" as InternalError,
        /// Another identity already uses the username.
        DuplicateUsername { username: String } =>
            "username {username} is already taken" as Conflict,
        /// Another identity is already linked to the provider account.
        DuplicateProviderLink { provider: String, uid: String } =>
            "provider account {provider}/{uid} is already linked" as Conflict,
    }
}

/// Storage for identities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Persist a new identity.
    async fn insert(&self, identity: &Identity) -> Result<(), IdentityRepositoryError>;

    /// Find an identity by id.
    async fn find_by_id(&self, id: &IdentityId)
    -> Result<Option<Identity>, IdentityRepositoryError>;

    /// Find the identity linked to a provider account.
    async fn find_by_provider(
        &self,
        link: &ProviderLink,
    ) -> Result<Option<Identity>, IdentityRepositoryError>;
}
