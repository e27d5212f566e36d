//! Job Scraper Server
//!
//! Runs remote.com scrapes on demand and serves grid-ready rows,
//! plus xlsx and CSV exports of whatever rows the client sends back.

mod config;
mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    tracing::info!("🚀 Starting Job Scraper Server...");

    let config = Config::from_env()?;
    tracing::info!("📡 Listings come from {}", config.scraper.listing_url);

    let state = Arc::new(AppState {
        scraper: config.scraper,
    });
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!("🌐 Server running at http://{}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
