//! Work catalogue HTTP handlers.
//!
//! ```text
//! GET    /api/v1/works?category=album
//! POST   /api/v1/works {"title":"Blue Train","category":"album"}
//! GET    /api/v1/works/{id}
//! PATCH  /api/v1/works/{id} {"title":"Blue Train","category":"album"}
//! DELETE /api/v1/works/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::WorkInput;
use crate::domain::{Work, WorkDetails};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_param_error, parse_category, parse_work_id};

/// Request body for creating or updating a work.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkRequest {
    #[schema(example = "Blue Train")]
    pub title: Option<String>,
    /// One of `book`, `album`, `movie`; matched exactly.
    #[serde(default)]
    #[schema(example = "album")]
    pub category: String,
}

impl From<WorkRequest> for WorkInput {
    fn from(value: WorkRequest) -> Self {
        Self {
            title: value.title,
            category: value.category,
        }
    }
}

/// A submitted work.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub title: String,
    #[schema(example = "album")]
    pub category: String,
    pub created_at: String,
}

impl From<&Work> for WorkResponse {
    fn from(work: &Work) -> Self {
        Self {
            id: work.id().to_string(),
            title: work.title().as_str().to_owned(),
            category: work.category().as_str().to_owned(),
            created_at: work.created_at().to_rfc3339(),
        }
    }
}

/// A work together with its vote count.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankedWorkResponse {
    #[serde(flatten)]
    pub work: WorkResponse,
    pub vote_count: u64,
}

impl RankedWorkResponse {
    pub fn new(work: &Work, vote_count: u64) -> Self {
        Self {
            work: WorkResponse::from(work),
            vote_count,
        }
    }
}

impl From<WorkDetails> for RankedWorkResponse {
    fn from(details: WorkDetails) -> Self {
        Self::new(&details.work, details.vote_count)
    }
}

/// Query string for `GET /works`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct WorksQuery {
    /// Category to list.
    pub category: Option<String>,
}

/// List works in one category, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/works",
    params(WorksQuery),
    responses(
        (status = 200, description = "Works in the category", body = [WorkResponse]),
        (status = 400, description = "Unknown or missing category", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["works"],
    operation_id = "listWorks"
)]
#[get("/works")]
pub async fn list_works(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<WorksQuery>,
) -> ApiResult<web::Json<Vec<WorkResponse>>> {
    session.require_identity_id()?;
    let raw = query
        .into_inner()
        .category
        .ok_or_else(|| missing_param_error("category"))?;
    let category = parse_category(&raw)?;
    let works = state.works_query.list_by_category(category).await?;
    Ok(web::Json(works.iter().map(WorkResponse::from).collect()))
}

/// Submit a new work.
#[utoipa::path(
    post,
    path = "/api/v1/works",
    request_body = WorkRequest,
    responses(
        (status = 201, description = "Work created", body = WorkResponse),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["works"],
    operation_id = "createWork"
)]
#[post("/works")]
pub async fn create_work(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<WorkRequest>,
) -> ApiResult<HttpResponse> {
    session.require_identity_id()?;
    let work = state.works.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(WorkResponse::from(&work)))
}

/// Show a work and its vote count.
#[utoipa::path(
    get,
    path = "/api/v1/works/{id}",
    params(("id" = String, Path, description = "Work id")),
    responses(
        (status = 200, description = "Work with vote count", body = RankedWorkResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such work", body = ErrorSchema)
    ),
    tags = ["works"],
    operation_id = "getWork"
)]
#[get("/works/{id}")]
pub async fn show_work(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<RankedWorkResponse>> {
    session.require_identity_id()?;
    let id = parse_work_id(&path.into_inner())?;
    let details = state.works_query.find(&id).await?;
    Ok(web::Json(details.into()))
}

/// Replace a work's title and category.
#[utoipa::path(
    patch,
    path = "/api/v1/works/{id}",
    params(("id" = String, Path, description = "Work id")),
    request_body = WorkRequest,
    responses(
        (status = 200, description = "Updated work", body = WorkResponse),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such work", body = ErrorSchema)
    ),
    tags = ["works"],
    operation_id = "updateWork"
)]
#[patch("/works/{id}")]
pub async fn update_work(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<WorkRequest>,
) -> ApiResult<web::Json<WorkResponse>> {
    session.require_identity_id()?;
    let id = parse_work_id(&path.into_inner())?;
    let work = state.works.update(&id, payload.into_inner().into()).await?;
    Ok(web::Json(WorkResponse::from(&work)))
}

/// Delete a work and every vote cast for it.
#[utoipa::path(
    delete,
    path = "/api/v1/works/{id}",
    params(("id" = String, Path, description = "Work id")),
    responses(
        (status = 204, description = "Work deleted"),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such work", body = ErrorSchema)
    ),
    tags = ["works"],
    operation_id = "deleteWork"
)]
#[delete("/works/{id}")]
pub async fn delete_work(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_identity_id()?;
    let id = parse_work_id(&path.into_inner())?;
    state.works.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "works_tests.rs"]
mod tests;
