//! Dependencies shared by HTTP handlers.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be tested against any port implementation.

use std::sync::Arc;

use crate::domain::ports::{
    IdentityProfileQuery, IdentitySignIn, RankingQuery, UpvoteCommand, WorkCommand, WorkQuery,
};

/// Default number of works per category on the rankings page.
pub const DEFAULT_RANKINGS_LIMIT: usize = 10;

/// Port implementations backing the HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub works: Arc<dyn WorkCommand>,
    pub works_query: Arc<dyn WorkQuery>,
    pub upvotes: Arc<dyn UpvoteCommand>,
    pub rankings: Arc<dyn RankingQuery>,
    pub sign_in: Arc<dyn IdentitySignIn>,
    pub profiles: Arc<dyn IdentityProfileQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub works: Arc<dyn WorkCommand>,
    pub works_query: Arc<dyn WorkQuery>,
    pub upvotes: Arc<dyn UpvoteCommand>,
    pub rankings: Arc<dyn RankingQuery>,
    pub sign_in: Arc<dyn IdentitySignIn>,
    pub profiles: Arc<dyn IdentityProfileQuery>,
    pub rankings_limit: usize,
}

impl HttpState {
    pub fn new(ports: HttpStatePorts) -> Self {
        Self::with_rankings_limit(ports, DEFAULT_RANKINGS_LIMIT)
    }

    /// Build state with a custom cut-off for `GET /rankings`.
    pub fn with_rankings_limit(ports: HttpStatePorts, rankings_limit: usize) -> Self {
        let HttpStatePorts {
            works,
            works_query,
            upvotes,
            rankings,
            sign_in,
            profiles,
        } = ports;
        Self {
            works,
            works_query,
            upvotes,
            rankings,
            sign_in,
            profiles,
            rankings_limit,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
