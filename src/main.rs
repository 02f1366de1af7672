use std::error::Error;
use std::sync::Arc;

use compensated_hours::api::{AppState, create_router};
use compensated_hours::config::ConfigLoader;
use compensated_hours::service::CompensationService;
use compensated_hours::store::InMemoryStore;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "compensated_hours=info".into()),
        )
        .with(fmt::layer())
        .init();

    let config_dir =
        std::env::var("COMPENSATION_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let addr = std::env::var("COMPENSATION_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.into());

    let config = ConfigLoader::load(&config_dir)?;
    let dates = ConfigLoader::load_allowed_dates(&config_dir)?;
    tracing::info!(
        config_dir = %config_dir,
        allowed_dates = dates.len(),
        "Configuration loaded"
    );

    let store = Arc::new(InMemoryStore::with_allowed_dates(dates));
    let app = create_router(AppState::new(CompensationService::in_memory(store, config)));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
