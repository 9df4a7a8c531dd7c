mod applications;
mod candidates;
mod config;
mod db;
mod errors;
mod identity;
mod jobs;
mod matching;
mod models;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::applications::pipeline::ApplicationPipeline;
use crate::applications::store::PgApplicationStore;
use crate::candidates::PgCandidateStore;
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::identity::accounts::PgAccountStore;
use crate::jobs::catalog::PgJobStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
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

    info!("Starting Portal API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.database_max_connections).await?;
    ensure_schema(&db).await?;

    // Every store shares the one pool
    let store = Arc::new(PgApplicationStore::new(db.clone()));
    let state = AppState {
        accounts: Arc::new(PgAccountStore::new(db.clone())),
        candidates: Arc::new(PgCandidateStore::new(db.clone())),
        jobs: Arc::new(PgJobStore::new(db)),
        pipeline: Arc::new(ApplicationPipeline::new(store)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
