//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::test::TestRequest;
use mockable::DefaultClock;
use serde_json::json;

use crate::domain::{IdentityService, RankingAggregator, VotingService, WorkCatalogueService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryStore;

/// Session middleware with a fresh key and an insecure `session` cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// `POST /api/v1/login` for a GitHub account named `username`.
pub fn login_request(username: &str) -> TestRequest {
    TestRequest::post().uri("/api/v1/login").set_json(json!({
        "provider": "github",
        "uid": format!("uid-{username}"),
        "username": username,
    }))
}

/// HTTP state wired to real services over `store`.
pub fn memory_state(store: &InMemoryStore) -> HttpState {
    let store = Arc::new(store.clone());
    let clock = Arc::new(DefaultClock);
    let catalogue = Arc::new(WorkCatalogueService::new(
        store.clone(),
        store.clone(),
        clock.clone(),
    ));
    HttpState::new(HttpStatePorts {
        works: catalogue.clone(),
        works_query: catalogue,
        upvotes: Arc::new(VotingService::new(store.clone(), store.clone(), clock.clone())),
        rankings: Arc::new(RankingAggregator::new(store.clone())),
        sign_in: Arc::new(IdentityService::new(store.clone(), store.clone(), clock.clone())),
        profiles: Arc::new(IdentityService::new(store.clone(), store, clock)),
    })
}
