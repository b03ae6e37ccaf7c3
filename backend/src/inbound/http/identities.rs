//! Identity HTTP handlers.
//!
//! ```text
//! POST /api/v1/login {"provider":"github","uid":"583231","username":"octocat"}
//! POST /api/v1/logout
//! GET  /api/v1/identities/me
//! ```
//!
//! `login` receives a profile already verified by the upstream OAuth proxy;
//! the provider handshake itself happens outside this service.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::IdentityProfile;
use crate::domain::{
    Error, Identity, IdentityValidationError, ProviderLink, ProviderProfile, Username,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::works::WorkResponse;

/// Verified provider profile for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "github")]
    pub provider: String,
    #[schema(example = "583231")]
    pub uid: String,
    #[schema(example = "octocat")]
    pub username: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl TryFrom<LoginRequest> for ProviderProfile {
    type Error = IdentityValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            link: ProviderLink::new(value.provider, value.uid)?,
            username: Username::new(value.username)?,
            display_name: value.display_name,
            email: value.email,
        })
    }
}

fn map_profile_validation_error(err: IdentityValidationError) -> Error {
    let (field, code) = match err {
        IdentityValidationError::EmptyUsername => ("username", "empty_username"),
        IdentityValidationError::EmptyProvider => ("provider", "empty_provider"),
        IdentityValidationError::EmptyProviderUid => ("uid", "empty_uid"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// A signed-in identity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    pub id: String,
    pub username: String,
    pub provider: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub created_at: String,
}

impl From<&Identity> for IdentityResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id().to_string(),
            username: identity.username().as_str().to_owned(),
            provider: identity.provider().provider().to_owned(),
            display_name: identity.display_name().map(str::to_owned),
            email: identity.email().map(str::to_owned),
            created_at: identity.created_at().to_rfc3339(),
        }
    }
}

/// Identity with the works it has upvoted, most recent first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub identity: IdentityResponse,
    pub ranked_works: Vec<WorkResponse>,
}

impl From<IdentityProfile> for ProfileResponse {
    fn from(profile: IdentityProfile) -> Self {
        Self {
            identity: IdentityResponse::from(&profile.identity),
            ranked_works: profile.ranked_works.iter().map(WorkResponse::from).collect(),
        }
    }
}

/// Sign in with a verified provider profile, creating the identity on first
/// use.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (
            status = 200,
            description = "Signed in",
            body = IdentityResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))
        ),
        (status = 400, description = "Invalid profile", body = ErrorSchema),
        (status = 409, description = "Username taken by another account", body = ErrorSchema)
    ),
    tags = ["identities"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<IdentityResponse>> {
    let profile =
        ProviderProfile::try_from(payload.into_inner()).map_err(map_profile_validation_error)?;
    let identity = state.sign_in.sign_in(profile).await?;
    session.persist_identity(&identity.id())?;
    Ok(web::Json(IdentityResponse::from(&identity)))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["identities"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// The signed-in identity and its upvoted works.
#[utoipa::path(
    get,
    path = "/api/v1/identities/me",
    responses(
        (status = 200, description = "Current identity", body = ProfileResponse),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["identities"],
    operation_id = "currentIdentity"
)]
#[get("/identities/me")]
pub async fn current_identity(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let id = session.require_identity_id()?;
    let profile = state.profiles.profile(&id).await.map_err(|err| {
        // A cookie for an identity that no longer exists is a stale session.
        if err.code() == crate::domain::ErrorCode::NotFound {
            session.purge();
            Error::unauthorized("login required")
        } else {
            err
        }
    })?;
    Ok(web::Json(profile.into()))
}
