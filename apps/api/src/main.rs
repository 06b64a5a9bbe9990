mod auth;
mod config;
mod db;
mod errors;
mod html;
mod interview;
mod models;
mod profile;
mod routes;
mod state;
mod store;
mod vapi_client;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::{IdentityBackend, JwtIdentityBackend, SessionResolver};
use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::interview::source::{InterviewSource, StoreInterviewSource};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{InterviewStore, PgStore};
use crate::vapi_client::VapiClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PrepView v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;
    let store: Arc<dyn InterviewStore> = Arc::new(PgStore::new(pool));

    let identity: Arc<dyn IdentityBackend> =
        Arc::new(JwtIdentityBackend::new(&config.session_secret));

    let interview_source: Arc<dyn InterviewSource> = match &config.vapi_base_url {
        Some(base_url) => {
            let client = VapiClient::new(base_url)?;
            info!("Interview pages load from {}", client.endpoint());
            Arc::new(client)
        }
        None => Arc::new(StoreInterviewSource::new(store.clone())),
    };

    // Build app state
    let state = AppState {
        sessions: SessionResolver::new(identity.clone(), store.clone()),
        store,
        identity,
        interview_source,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
