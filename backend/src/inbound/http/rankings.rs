//! Ranking HTTP handlers. Public; no session required.
//!
//! ```text
//! GET /api/v1/rankings
//! GET /api/v1/rankings/{category}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Category, CategoryRanking, WorkTally};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_category;
use crate::inbound::http::works::RankedWorkResponse;

fn ranked(works: &[WorkTally]) -> Vec<RankedWorkResponse> {
    works
        .iter()
        .map(|tally| RankedWorkResponse::new(&tally.work, tally.vote_count))
        .collect()
}

/// Top works of every category plus the overall leader.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankingsResponse {
    pub book: Vec<RankedWorkResponse>,
    pub album: Vec<RankedWorkResponse>,
    pub movie: Vec<RankedWorkResponse>,
    /// Best work across all categories; absent when nothing has been
    /// submitted.
    pub spotlight: Option<RankedWorkResponse>,
}

impl RankingsResponse {
    fn new(rankings: &[CategoryRanking], spotlight: Option<&WorkTally>) -> Self {
        let mut response = Self {
            spotlight: spotlight
                .map(|tally| RankedWorkResponse::new(&tally.work, tally.vote_count)),
            ..Self::default()
        };
        for ranking in rankings {
            let slot = match ranking.category {
                Category::Book => &mut response.book,
                Category::Album => &mut response.album,
                Category::Movie => &mut response.movie,
            };
            *slot = ranked(&ranking.works);
        }
        response
    }
}

/// Top works per category, best first.
#[utoipa::path(
    get,
    path = "/api/v1/rankings",
    responses(
        (status = 200, description = "Rankings for every category", body = RankingsResponse)
    ),
    tags = ["rankings"],
    operation_id = "listRankings",
    security([])
)]
#[get("/rankings")]
pub async fn list_rankings(state: web::Data<HttpState>) -> ApiResult<web::Json<RankingsResponse>> {
    let rankings = state.rankings.top_by_category(state.rankings_limit).await?;
    let spotlight = state.rankings.spotlight().await?;
    Ok(web::Json(RankingsResponse::new(&rankings, spotlight.as_ref())))
}

/// Every work in one category, best first.
#[utoipa::path(
    get,
    path = "/api/v1/rankings/{category}",
    params(("category" = String, Path, description = "book, album, or movie")),
    responses(
        (status = 200, description = "Ranked works", body = [RankedWorkResponse]),
        (status = 400, description = "Unknown category", body = ErrorSchema)
    ),
    tags = ["rankings"],
    operation_id = "rankCategory",
    security([])
)]
#[get("/rankings/{category}")]
pub async fn rank_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<RankedWorkResponse>>> {
    let category = parse_category(&path.into_inner())?;
    let ranking = state.rankings.rank_by_category(category).await?;
    Ok(web::Json(ranked(&ranking.works)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::ports::{IdentityRepository, VoteRepository, WorkRepository};
    use crate::domain::test_fixtures::sample_work;
    use crate::domain::{
        Identity, IdentityId, ProviderLink, ProviderProfile, Username, Vote, VoteId, Work,
    };
    use crate::inbound::http::test_utils::memory_state;
    use crate::outbound::memory::InMemoryStore;

    async fn voter(store: &InMemoryStore, name: &str) -> IdentityId {
        let identity = Identity::from_profile(
            IdentityId::random(),
            ProviderProfile {
                link: ProviderLink::new("github", name).expect("link"),
                username: Username::new(name).expect("username"),
                display_name: None,
                email: None,
            },
            chrono::Utc::now(),
        );
        IdentityRepository::insert(store, &identity)
            .await
            .expect("insert identity");
        identity.id()
    }

    async fn vote(store: &InMemoryStore, identity_id: IdentityId, work: &Work) {
        store
            .record(&Vote {
                id: VoteId::random(),
                identity_id,
                work_id: work.id(),
                created_at: chrono::Utc::now(),
            })
            .await
            .expect("record vote");
    }

    #[rstest]
    #[actix_web::test]
    async fn rankings_cover_every_category_and_name_a_spotlight() {
        let store = InMemoryStore::new();
        let popular = sample_work("Kind of Blue", Category::Album);
        let quiet = sample_work("Dune", Category::Book);
        WorkRepository::insert(&store, &popular).await.expect("insert");
        WorkRepository::insert(&store, &quiet).await.expect("insert");
        let ada = voter(&store, "ada").await;
        vote(&store, ada, &popular).await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(memory_state(&store)))
                .service(web::scope("/api/v1").service(list_rankings)),
        )
        .await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/api/v1/rankings").to_request())
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["album"][0]["title"], "Kind of Blue");
        assert_eq!(body["album"][0]["voteCount"], 1);
        assert_eq!(body["book"][0]["voteCount"], 0);
        assert_eq!(body["movie"], Value::Array(Vec::new()));
        assert_eq!(body["spotlight"]["title"], "Kind of Blue");
    }

    #[rstest]
    #[actix_web::test]
    async fn category_ranking_orders_by_votes() {
        let store = InMemoryStore::new();
        let a = sample_work("A", Category::Movie);
        let b = sample_work("B", Category::Movie);
        let c = sample_work("C", Category::Movie);
        for work in [&c, &b, &a] {
            WorkRepository::insert(&store, work).await.expect("insert");
        }
        let voters = [
            voter(&store, "ada").await,
            voter(&store, "grace").await,
            voter(&store, "linus").await,
        ];
        for identity in voters {
            vote(&store, identity, &a).await;
        }
        vote(&store, voters[0], &b).await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(memory_state(&store)))
                .service(web::scope("/api/v1").service(rank_category)),
        )
        .await;
        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/rankings/movie").to_request(),
        )
        .await;

        let body: Value = test::read_body_json(response).await;
        let titles: Vec<&str> = body
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|entry| entry["title"].as_str())
            .collect();
        assert_eq!(titles, ["A", "B", "C"]);
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_category_is_a_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(memory_state(&InMemoryStore::new())))
                .service(web::scope("/api/v1").service(rank_category)),
        )
        .await;
        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/rankings/albums").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
