use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use storefront_api::{config::AppConfig, router, AppState};

#[derive(Parser)]
#[command(name = "storefront-api", about = "Products and wishlists REST API", version)]
struct Args {
    #[arg(long, help = "Bind host (overrides HOST)")]
    host: Option<String>,

    #[arg(long, help = "Listening port (overrides PORT)")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("storefront_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let mut config = AppConfig::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!(
        "Starting storefront API in {:?} mode with {:?} store",
        config.environment,
        config.database.backend
    );

    let bind_addr = config.bind_addr();
    let state = AppState::from_config(config)
        .await
        .context("failed to open document store")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Storefront API listening on http://{}", bind_addr);

    axum::serve(listener, router(state)).await.context("server error")?;
    Ok(())
}
