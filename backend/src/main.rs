//! Service entry-point: loads settings, prepares storage and runs the server.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use usuarios::inbound::http::health::HealthState;
use usuarios::inbound::http::session_config::{BuildMode, session_settings_from_env};
use usuarios::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use usuarios::settings::AppSettings;

/// Apply embedded migrations, then open the connection pool.
async fn connect(settings: &AppSettings, url: String) -> io::Result<DbPool> {
    let migration_url = url.clone();
    web::block(move || run_pending_migrations(&migration_url))
        .await
        .map_err(io::Error::other)?
        .map_err(|err| io::Error::other(format!("database migrations failed: {err}")))?;
    info!("database migrations applied");

    let pool_config = PoolConfig::new(url).with_max_size(settings.db_max_connections());
    DbPool::new(pool_config)
        .await
        .map_err(|err| io::Error::other(format!("database pool setup failed: {err}")))
}

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

    let settings =
        AppSettings::load().map_err(|err| io::Error::other(format!("settings: {err}")))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;

    let mut config = ServerConfig::new(session, bind_addr);
    if let Some(url) = settings.database_url.clone() {
        config = config.with_db_pool(connect(&settings, url).await?);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::prometheus_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
