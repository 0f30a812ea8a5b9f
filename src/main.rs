// src/main.rs
mod chunk;
mod clients;
mod commands;
mod config;
mod handlers;
mod interaction;
mod names;
mod pipeline;
mod signature;
mod types;

#[cfg(test)]
mod test_support;

use axum::{routing::post, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use pipeline::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let addr = config.listen_addr;
    let app = app(AppState::new(config));

    info!("interactions endpoint listening on {addr}");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/interactions", post(pipeline::interactions))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
