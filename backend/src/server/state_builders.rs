//! Builders wiring domain services to their storage adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use media_ranker::domain::ports::{IdentityRepository, VoteRepository, WorkRepository};
use media_ranker::domain::{IdentityService, RankingAggregator, VotingService, WorkCatalogueService};
use media_ranker::inbound::http::state::{HttpState, HttpStatePorts};
use media_ranker::outbound::memory::InMemoryStore;
use media_ranker::outbound::persistence::{
    DieselIdentityRepository, DieselVoteRepository, DieselWorkRepository,
};

use super::{ServerConfig, Storage};

/// Wire every driving port over one set of repositories.
fn ports_over<W, V, I>(
    works: Arc<W>,
    votes: Arc<V>,
    identities: Arc<I>,
    clock: Arc<dyn Clock>,
) -> HttpStatePorts
where
    W: WorkRepository + 'static,
    V: VoteRepository + 'static,
    I: IdentityRepository + 'static,
{
    let catalogue = Arc::new(WorkCatalogueService::new(
        works.clone(),
        votes.clone(),
        clock.clone(),
    ));
    let identity_service = Arc::new(IdentityService::new(identities, votes.clone(), clock.clone()));
    HttpStatePorts {
        works: catalogue.clone(),
        works_query: catalogue,
        upvotes: Arc::new(VotingService::new(works, votes.clone(), clock)),
        rankings: Arc::new(RankingAggregator::new(votes)),
        sign_in: identity_service.clone(),
        profiles: identity_service,
    }
}

/// Build the shared HTTP state. Diesel repositories back the services when a
/// pool is configured; otherwise one [`InMemoryStore`] serves every port.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let ports = match config.storage() {
        Storage::Postgres(pool) => ports_over(
            Arc::new(DieselWorkRepository::new(pool.clone())),
            Arc::new(DieselVoteRepository::new(pool.clone())),
            Arc::new(DieselIdentityRepository::new(pool.clone())),
            clock,
        ),
        Storage::InMemory => {
            info!("no database configured; state is kept in memory");
            let store = Arc::new(InMemoryStore::new());
            ports_over(store.clone(), store.clone(), store, clock)
        }
    };
    web::Data::new(HttpState::with_rankings_limit(ports, config.rankings_limit))
}
