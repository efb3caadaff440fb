//! Roadside Dispatch API server.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use roadside_dispatch::adapters::crm::{CrmClientConfig, HttpDispatchCrm};
use roadside_dispatch::adapters::http::{app, AppState};
use roadside_dispatch::adapters::postgres::{PostgresBookingRepository, PostgresInquiryRepository};
use roadside_dispatch::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    info!(environment = ?config.server.environment, "Starting Roadside Dispatch API");

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!().run(&pool).await?;
        info!("Database migrations applied");
    }

    if config.crm.api_key.is_none() {
        tracing::warn!("No CRM API key configured, CRM calls will be rejected");
    }
    let crm_config = CrmClientConfig::from(&config.crm);
    info!(base_url = %crm_config.base_url(), "Dispatch CRM configured");
    let crm = HttpDispatchCrm::new(crm_config)?;

    let state = AppState::new(
        Arc::new(crm),
        Arc::new(PostgresBookingRepository::new(pool.clone())),
        Arc::new(PostgresInquiryRepository::new(pool)),
    );
    let router = app(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, router).await?;
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}
