use std::{net::SocketAddr, sync::Arc};

use services::{AppServices, Clock};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod routes;

use config::{build_storage, load_settings};
use routes::{AppState, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings();
    let storage = build_storage(&settings).await?;
    let services = AppServices::from_storage(&storage, Clock::system());
    let app = build_router(Arc::new(AppState { services }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
