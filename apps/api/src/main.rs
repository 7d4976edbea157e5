mod catalog;
mod config;
mod controller;
mod errors;
mod livekit;
mod models;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::livekit::LiveKitClient;
use crate::routes::build_router;
use crate::session::service::SessionService;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Coach API v{}", env!("CARGO_PKG_VERSION"));

    // Video credentials are checked per request so the reference routes stay up without them
    if let Err(e) = config.livekit.credentials() {
        warn!("LiveKit is not configured, session creation will fail: {e}");
    }
    if config.storage.bucket.is_none() {
        warn!("AWS_S3_BUCKET_NAME is not set, sessions will not be recorded");
    }

    let catalog = Arc::new(Catalog::load(config.catalog_dir.as_deref())?);

    let backend = Arc::new(LiveKitClient::new()?);
    info!("LiveKit client initialized");

    let state = AppState {
        sessions: SessionService::new(catalog.clone(), &config, backend),
        catalog,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
