//! Handler tests for the work catalogue endpoints over the in-memory store.

use super::*;
use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{App, test};
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::WorkId;
use crate::inbound::http::identities::login;
use crate::inbound::http::test_utils::{
    login_request, memory_state, session_cookie, test_session_middleware,
};
use crate::inbound::http::votes::upvote;
use crate::outbound::memory::InMemoryStore;

macro_rules! works_app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(memory_state($store)))
                .service(
                    web::scope("/api/v1")
                        .service(login)
                        .service(list_works)
                        .service(create_work)
                        .service(show_work)
                        .service(update_work)
                        .service(delete_work)
                        .service(upvote),
                ),
        )
        .await
    };
}

fn create_request(cookie: &Cookie<'static>, payload: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/works")
        .cookie(cookie.clone())
        .set_json(payload)
}

#[rstest]
#[case("book")]
#[case("album")]
#[case("movie")]
#[actix_web::test]
async fn create_accepts_every_category(#[case] category: &str) {
    let store = InMemoryStore::new();
    let app = works_app!(&store);
    let cookie = session_cookie(&test::call_service(&app, login_request("ada").to_request()).await);

    let response = test::call_service(
        &app,
        create_request(&cookie, json!({"title": "new test work", "category": category}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["category"], category);
    assert_eq!(body["title"], "new test work");

    assert_eq!(store.work_total(), 1);
}

#[rstest]
#[case("nope")]
#[case("42")]
#[case("")]
#[case("  ")]
#[case("albumstrailingtext")]
#[case("Album")]
#[case("albums")]
#[actix_web::test]
async fn create_rejects_unknown_categories_without_storing(#[case] category: &str) {
    let store = InMemoryStore::new();
    let app = works_app!(&store);
    let cookie = session_cookie(&test::call_service(&app, login_request("ada").to_request()).await);

    let response = test::call_service(
        &app,
        create_request(&cookie, json!({"title": "new test work", "category": category}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["violations"][0]["field"], "category");
    assert_eq!(store.work_total(), 0);
}

#[rstest]
#[case(json!({"title": null, "category": "album"}))]
#[case(json!({"category": "album"}))]
#[case(json!({"title": "   ", "category": "album"}))]
#[actix_web::test]
async fn create_rejects_missing_or_blank_titles(#[case] payload: Value) {
    let store = InMemoryStore::new();
    let app = works_app!(&store);
    let cookie = session_cookie(&test::call_service(&app, login_request("ada").to_request()).await);

    let response = test::call_service(&app, create_request(&cookie, payload).to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["details"]["violations"][0]["field"], "title");
    assert_eq!(store.work_total(), 0);
}

#[rstest]
#[actix_web::test]
async fn anonymous_requests_are_unauthorised() {
    let store = InMemoryStore::new();
    let app = works_app!(&store);

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/works?category=album")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn list_requires_a_category() {
    let store = InMemoryStore::new();
    let app = works_app!(&store);
    let cookie = session_cookie(&test::call_service(&app, login_request("ada").to_request()).await);

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/works")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "missing_field");
}

#[rstest]
#[actix_web::test]
async fn show_reports_vote_count_and_unknown_ids_are_not_found() {
    let store = InMemoryStore::new();
    let app = works_app!(&store);
    let cookie = session_cookie(&test::call_service(&app, login_request("ada").to_request()).await);
    let created: Value = test::read_body_json(
        test::call_service(
            &app,
            create_request(&cookie, json!({"title": "Heat", "category": "movie"})).to_request(),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().expect("id").to_owned();
    test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/works/{id}/upvote"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;

    let shown = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/works/{id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(shown.status(), StatusCode::OK);
    let body: Value = test::read_body_json(shown).await;
    assert_eq!(body["voteCount"], 1);
    assert_eq!(body["title"], "Heat");

    let unknown = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/works/{}", WorkId::random()))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let malformed = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/works/nonexistent-id")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(malformed.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(malformed).await;
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn upvoting_a_nonexistent_id_is_not_found() {
    let store = InMemoryStore::new();
    let app = works_app!(&store);
    let cookie = session_cookie(&test::call_service(&app, login_request("ada").to_request()).await);

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/works/nonexistent-id/upvote")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "not_found");
    assert_eq!(store.vote_total(), 0);
}

#[rstest]
#[actix_web::test]
async fn title_is_returned_exactly_as_submitted() {
    let store = InMemoryStore::new();
    let app = works_app!(&store);
    let cookie = session_cookie(&test::call_service(&app, login_request("ada").to_request()).await);

    let created = test::call_service(
        &app,
        create_request(&cookie, json!({"title": "  The Wall ", "category": "album"})).to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(created).await;
    assert_eq!(created["title"], "  The Wall ");

    let shown = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/works/{}", created["id"].as_str().expect("id")))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(shown).await;
    assert_eq!(body["title"], "  The Wall ");
}

#[rstest]
#[actix_web::test]
async fn update_validates_then_applies() {
    let store = InMemoryStore::new();
    let app = works_app!(&store);
    let cookie = session_cookie(&test::call_service(&app, login_request("ada").to_request()).await);
    let created: Value = test::read_body_json(
        test::call_service(
            &app,
            create_request(&cookie, json!({"title": "Poodr", "category": "book"})).to_request(),
        )
        .await,
    )
    .await;
    let uri = format!("/api/v1/works/{}", created["id"].as_str().expect("id"));

    let rejected = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&uri)
            .cookie(cookie.clone())
            .set_json(json!({"title": "Poodr", "category": "boooo"}))
            .to_request(),
    )
    .await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let updated = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&uri)
            .cookie(cookie)
            .set_json(json!({"title": "new test work", "category": "album"}))
            .to_request(),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let body: Value = test::read_body_json(updated).await;
    assert_eq!(body["title"], "new test work");
    assert_eq!(body["category"], "album");
    assert_eq!(body["createdAt"], created["createdAt"]);
    assert_eq!(store.work_total(), 1);
}

#[rstest]
#[actix_web::test]
async fn update_of_unknown_work_is_not_found() {
    let store = InMemoryStore::new();
    let app = works_app!(&store);
    let cookie = session_cookie(&test::call_service(&app, login_request("ada").to_request()).await);

    let response = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/v1/works/{}", WorkId::random()))
            .cookie(cookie)
            .set_json(json!({"title": "new test work", "category": "album"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn delete_removes_the_work_and_its_votes() {
    let store = InMemoryStore::new();
    let app = works_app!(&store);
    let cookie = session_cookie(&test::call_service(&app, login_request("ada").to_request()).await);
    let created: Value = test::read_body_json(
        test::call_service(
            &app,
            create_request(&cookie, json!({"title": "Heat", "category": "movie"})).to_request(),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().expect("id").to_owned();
    test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/works/{id}/upvote"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(store.vote_total(), 1);

    let deleted = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/works/{id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    assert_eq!(store.work_total(), 0);
    assert_eq!(store.vote_total(), 0);

    let again = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/works/{id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}
