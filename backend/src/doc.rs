//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the health probes, and the
//! error schemas from [`crate::inbound::http::schemas`]. The document backs
//! Swagger UI in debug builds and `cargo run --bin openapi-dump`.

use crate::inbound::http::identities::{IdentityResponse, LoginRequest, ProfileResponse};
use crate::inbound::http::rankings::RankingsResponse;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::votes::UpvoteResponse;
use crate::inbound::http::works::{RankedWorkResponse, WorkRequest, WorkResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Media ranker API",
        description = "Submit books, albums, and movies, upvote them once per identity, \
                       and read per-category rankings."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::identities::login,
        crate::inbound::http::identities::logout,
        crate::inbound::http::identities::current_identity,
        crate::inbound::http::works::list_works,
        crate::inbound::http::works::create_work,
        crate::inbound::http::works::show_work,
        crate::inbound::http::works::update_work,
        crate::inbound::http::works::delete_work,
        crate::inbound::http::votes::upvote,
        crate::inbound::http::rankings::list_rankings,
        crate::inbound::http::rankings::rank_category,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        IdentityResponse,
        ProfileResponse,
        WorkRequest,
        WorkResponse,
        RankedWorkResponse,
        UpvoteResponse,
        RankingsResponse,
    )),
    tags(
        (name = "identities", description = "Sign-in and the current identity"),
        (name = "works", description = "Submitted books, albums, and movies"),
        (name = "votes", description = "One upvote per identity and work"),
        (name = "rankings", description = "Works ordered by vote count"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
