use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use expense_tracker_api::config::AppConfig;
use expense_tracker_api::database::DatabaseManager;
use expense_tracker_api::{app, AppState};

#[derive(Debug, Parser)]
#[command(about = "Personal expense tracking API")]
struct Args {
    /// Listening port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Create the users/expenses tables if they do not exist
    #[arg(long)]
    init_schema: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up JWT_SECRET, DB_*, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("expense_tracker_api=debug,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env().context("failed to load configuration")?;
    if let Some(port) = args.port {
        config.api.port = port;
    }
    tracing::info!("Starting expense tracker API in {:?} mode", config.environment);

    let database = DatabaseManager::connect_lazy(&config.database)
        .context("invalid database configuration")?;
    let state = AppState::from_config(&config, database.pool()).context("failed to build token issuer")?;

    // A failed probe is logged, not fatal: requests surface store errors
    // until the database is reachable.
    match state.auth.ping().await {
        Ok(()) => tracing::info!("Connected to database"),
        Err(e) => tracing::warn!("Database connection error: {}", e),
    }
    if args.init_schema {
        database
            .init_schema()
            .await
            .context("failed to initialise database schema")?;
    }

    let app = app(state, &config.api.cors_origins);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Server is running on http://localhost:{}", config.api.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    database.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
