use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use todo_api::{auth, config};
use todo_api::database::{DatabaseManager, Store};
use todo_api::{app, is_development, AppState};

#[derive(Parser)]
#[command(name = "todo-api")]
#[command(about = "Personal task-tracking REST API")]
#[command(version)]
struct Args {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Keep all data in process memory instead of Postgres")]
    in_memory: bool,

    #[arg(long, env = "FRONTEND_DIR", help = "Directory of static dashboard files to serve at /")]
    frontend_dir: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "todo_api=debug,tower_http=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = config::config().clone();
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if args.frontend_dir.is_some() {
        config.api.frontend_dir = args.frontend_dir;
    }

    let in_memory = args.in_memory || (config.database.url.is_none() && is_development!());
    if in_memory && config.security.jwt_secret.is_empty() {
        tracing::warn!("No JWT_SECRET set; signing with a random secret for this process only");
        config.security.jwt_secret = auth::ephemeral_secret();
    }
    config.validate()?;

    tracing::info!("Starting Todo API in {:?} mode", config.environment);

    let store = if in_memory {
        tracing::warn!("Using in-memory store; data is lost on shutdown");
        Store::memory()
    } else {
        let pool = DatabaseManager::connect(&config.database).await?;
        if config.database.run_migrations {
            DatabaseManager::migrate(&pool).await?;
        }
        Store::postgres(pool)
    };

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let state = AppState::new(config, store.clone());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Todo API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
