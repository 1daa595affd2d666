//! People service entry-point: loads settings, prepares the database, and
//! serves the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use people::config::AppSettings;
use people::inbound::http::health::HealthState;
use people::outbound::enrichment::HttpEnrichmentSource;
use people::outbound::persistence::{DbPool, DieselPeopleRepository};

use server::{ServerConfig, create_server, drain_on, shutdown_signal};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load configuration")?;
    info!(
        host = %settings.host,
        port = settings.port,
        db_host = %settings.db_host,
        db_name = %settings.db_name,
        "configuration loaded"
    );

    let bind_addr = settings.bind_addr()?;
    let endpoints = settings.enrichment_endpoints()?;
    let enrichment = HttpEnrichmentSource::new(endpoints, settings.enrichment_timeout())
        .wrap_err("failed to build enrichment client")?;

    let pool = DbPool::new(settings.pool_config()?)
        .await
        .wrap_err("failed to create database pool")?;
    DieselPeopleRepository::new(pool.clone())
        .ensure_schema()
        .await
        .wrap_err("failed to prepare database schema")?;
    info!("database schema ready");

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, pool, enrichment);
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state, server.handle()));
    server.await?;
    Ok(())
}
