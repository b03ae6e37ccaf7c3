//! Everything `create_server` needs, assembled by `main`.

use std::net::SocketAddr;

use media_ranker::inbound::http::session_config::SessionSettings;
use media_ranker::inbound::http::state::DEFAULT_RANKINGS_LIMIT;
use media_ranker::outbound::persistence::DbPool;

/// Backing store for identities, works, and votes.
#[derive(Clone)]
pub enum Storage {
    /// Process-local tables; lost on restart.
    InMemory,
    Postgres(DbPool),
}

impl Storage {
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Self::InMemory => "memory",
            Self::Postgres(_) => "postgres",
        }
    }
}

pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: Storage,
    pub(crate) rankings_limit: usize,
}

impl ServerConfig {
    /// In-memory storage and the default rankings limit until overridden.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            storage: Storage::InMemory,
            rankings_limit: DEFAULT_RANKINGS_LIMIT,
        }
    }

    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.storage = Storage::Postgres(pool);
        self
    }

    #[must_use]
    pub fn with_rankings_limit(mut self, rankings_limit: usize) -> Self {
        self.rankings_limit = rankings_limit;
        self
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}
