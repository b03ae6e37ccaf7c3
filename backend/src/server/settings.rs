//! Server settings loaded via OrthoConfig from `RANKER_*` environment
//! variables, configuration files, and CLI flags.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use media_ranker::inbound::http::state::DEFAULT_RANKINGS_LIMIT;
use media_ranker::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Raised when a setting is present but unusable.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("rankings limit must be at least 1")]
    RankingsLimit,
}

/// Listener, persistence, and ranking settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RANKER")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it the process keeps state in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Milliseconds a request waits for a pooled connection.
    pub db_checkout_timeout_ms: Option<u64>,
    /// Apply pending migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
    /// Works per category returned by `GET /api/v1/rankings`.
    pub rankings_limit: Option<usize>,
}

impl ServerSettings {
    /// Parsed bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn rankings_limit(&self) -> Result<usize, SettingsError> {
        match self.rankings_limit {
            Some(0) => Err(SettingsError::RankingsLimit),
            Some(limit) => Ok(limit),
            None => Ok(DEFAULT_RANKINGS_LIMIT),
        }
    }

    /// Pool configuration when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        let mut config = PoolConfig::new(url);
        if let Some(max) = self.db_max_connections {
            config = config.with_max_connections(max);
        }
        if let Some(millis) = self.db_checkout_timeout_ms {
            config = config.with_checkout_timeout(Duration::from_millis(millis));
        }
        Some(config)
    }
}
