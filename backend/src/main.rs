//! Backend entry-point: loads settings, prepares the store and serves the API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use feedback_backend::inbound::http::health::HealthState;
use feedback_backend::outbound::groq::groq_settings_from_env;
use feedback_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::{ServerConfig, ServerSettings, create_server};

fn startup_error(stage: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{stage}: {err}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| startup_error("invalid settings", err))?;
    let groq = groq_settings_from_env(&DefaultEnv::new())
        .map_err(|err| startup_error("invalid chat provider settings", err))?;

    let database_url = settings.database_url.as_str();
    run_migrations(database_url).map_err(|err| startup_error("migration failed", err))?;
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size))
        .await
        .map_err(|err| startup_error("store unavailable", err))?;
    info!(database_url, "feedback store ready");

    let bind_addr = settings.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(bind_addr.clone(), pool, groq),
    )?;
    info!(host = %bind_addr.0, port = bind_addr.1, "server listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
