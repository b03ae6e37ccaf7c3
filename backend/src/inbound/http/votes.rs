//! Upvote HTTP handler.
//!
//! ```text
//! POST /api/v1/works/{id}/upvote
//! ```
//!
//! A repeated upvote is not an error in the domain; it is reported here as
//! `409` with the failure status so clients can tell the cases apart.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{UpvoteOutcome, UpvoteStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_work_id;

/// Result of an upvote attempt.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpvoteResponse {
    /// `success` or `failure`.
    #[schema(example = "success")]
    pub status: String,
    #[schema(example = "Successfully upvoted!")]
    pub message: String,
    /// Votes on the work after this request.
    pub vote_count: u64,
}

impl From<UpvoteOutcome> for UpvoteResponse {
    fn from(outcome: UpvoteOutcome) -> Self {
        let status = match outcome.status() {
            UpvoteStatus::Success => "success",
            UpvoteStatus::Failure => "failure",
        };
        Self {
            status: status.to_owned(),
            message: outcome.message().to_owned(),
            vote_count: outcome.vote_count(),
        }
    }
}

/// Upvote a work as the signed-in identity.
#[utoipa::path(
    post,
    path = "/api/v1/works/{id}/upvote",
    params(("id" = String, Path, description = "Work id")),
    responses(
        (status = 200, description = "Vote recorded", body = UpvoteResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such work", body = ErrorSchema),
        (status = 409, description = "Already voted for this work", body = UpvoteResponse)
    ),
    tags = ["votes"],
    operation_id = "upvoteWork"
)]
#[post("/works/{id}/upvote")]
pub async fn upvote(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let identity_id = session.require_identity_id()?;
    let work_id = parse_work_id(&path.into_inner())?;
    let outcome = state.upvotes.upvote(&identity_id, &work_id).await?;

    let mut response = match outcome.status() {
        UpvoteStatus::Success => HttpResponse::Ok(),
        UpvoteStatus::Failure => HttpResponse::Conflict(),
    };
    Ok(response.json(UpvoteResponse::from(outcome)))
}
