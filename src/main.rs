use std::env;

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use payroll_ledger::api::{AppState, create_router};
use payroll_ledger::config::ConfigLoader;
use payroll_ledger::store::InMemoryStore;

const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir = env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let config = ConfigLoader::load(&config_dir)?;

    let store = InMemoryStore::new();
    let seeded = config.seed_store(&store)?;
    info!(config_dir = %config_dir, seeded, "Seeded workers");

    let addr = format!(
        "{}:{}",
        config.settings().server.host,
        config.settings().server.port
    );
    let app = create_router(AppState::new(config, store));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
