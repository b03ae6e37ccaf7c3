//! Cookie session wrapper exposing identity-level operations.
//!
//! Handlers never touch the raw session map; they persist, read, or purge
//! the signed-in identity through [`SessionContext`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, IdentityId};

pub(crate) const IDENTITY_ID_KEY: &str = "identity_id";

/// Newtype over the Actix session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the signed-in identity and rotate the session id.
    pub fn persist_identity(&self, identity_id: &IdentityId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(IDENTITY_ID_KEY, identity_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The signed-in identity, if the cookie carries a well-formed one.
    pub fn identity_id(&self) -> Result<Option<IdentityId>, Error> {
        let raw = self
            .0
            .get::<String>(IDENTITY_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        match raw.parse::<IdentityId>() {
            Ok(id) => Ok(Some(id)),
            Err(error) => {
                warn!(%error, "invalid identity id in session cookie");
                Ok(None)
            }
        }
    }

    /// Require a signed-in identity or fail with `401 Unauthorized`.
    pub fn require_identity_id(&self) -> Result<IdentityId, Error> {
        self.identity_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop every session entry and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
