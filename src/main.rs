//! Todo API server
//! Mission: Load configuration, bootstrap the database, serve the router

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todoapp_backend::{create_router, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads env-backed flags
    let _ = dotenv();
    init_tracing();

    let config = Config::parse();

    info!("Todo API starting");
    if config.uses_dev_secret() {
        warn!("JWT_SECRET not set, using the development secret. CHANGE IT IN PRODUCTION!");
    }

    let state = AppState::from_config(&config)?;
    info!(
        "Authentication initialized (token ttl {}m, bcrypt cost {})",
        config.token_ttl_minutes, config.bcrypt_cost
    );

    let app = create_router(state);

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("API server listening on {}", config.bind);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todoapp_backend=debug,todoapp=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
