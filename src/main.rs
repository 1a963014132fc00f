//! payroll-engine: HTTP service over the payroll engine.
//!
//! Loads the configuration directory (`$PAYROLL_CONFIG_DIR`, or `./config`),
//! seeds the in-memory store and serves the API.

use std::sync::Arc;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::clock::SystemClock;
use payroll_engine::config::ConfigLoader;
use payroll_engine::otp::TracingOtpNotifier;
use payroll_engine::store::InMemoryStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config_dir = ConfigLoader::config_dir();
    let config = ConfigLoader::load(&config_dir)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.app().logging.filter.as_str().into()),
        )
        .init();

    let (organizations, employees) = config.seed().clone().into_rows();
    tracing::info!(
        config_dir = %config_dir.display(),
        organizations = organizations.len(),
        employees = employees.len(),
        "Seeding store"
    );
    let store = InMemoryStore::seeded(organizations, employees)?;

    let state = AppState::new(
        Arc::new(store),
        Arc::new(SystemClock),
        Arc::new(TracingOtpNotifier),
        config.otp_ttl(),
    );
    let app = create_router(state);

    let server = &config.app().server;
    let addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("payroll-engine listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
