//! Backend entry-point: loads settings, prepares storage, and serves the
//! REST API.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use media_ranker::inbound::http::health::HealthState;
use media_ranker::inbound::http::session_config::{BuildMode, session_settings_from_env};
use media_ranker::outbound::persistence::{DbPool, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|err| io::Error::other(format!("failed to load settings: {err}")))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let rankings_limit = settings.rankings_limit().map_err(io::Error::other)?;

    let mut config = ServerConfig::new(session, bind_addr).with_rankings_limit(rankings_limit);
    if let Some(pool_config) = settings.pool_config() {
        if settings.run_migrations {
            run_pending_migrations(pool_config.database_url())
                .await
                .map_err(io::Error::other)?;
        }
        let pool = DbPool::connect(pool_config).await.map_err(io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let storage = config.storage().describe();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, storage, rankings_limit, "serving");
    server.await
}
