mod config;
mod editor;
mod errors;
mod export;
mod generation;
mod layout;
mod models;
mod routes;
mod skills;
mod state;
mod storage;
mod templates;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::editor::session::Session;
use crate::export::pdf::LopdfAssembler;
use crate::export::pipeline::ExportPipeline;
use crate::export::raster::InkRasterizer;
use crate::export::sink::ExportSink;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::file::FileStore;
use crate::storage::persistence;
use crate::storage::redis_store::RedisStore;
use crate::storage::KeyValueStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CVCraft v{}", env!("CARGO_PKG_VERSION"));

    let store = open_store(&config).await;

    // Restore whatever survived from the last run; each field falls back on its own
    let restored = persistence::load(store.as_ref()).await;
    let session = restored.apply(Session::fresh(config.free_exports));
    info!(
        template = session.template.as_str(),
        free_exports_remaining = session.gating.free_exports_remaining,
        "Session restored"
    );

    let mut pipeline = ExportPipeline::new(Arc::new(InkRasterizer), Arc::new(LopdfAssembler))
        .with_settle_delay(Duration::from_millis(config.export_settle_ms));
    if let Some(dir) = &config.export_dir {
        info!("Exports will also be written to {}", dir.display());
        pipeline = pipeline.with_sink(ExportSink::new(dir.clone()));
    }

    let state = AppState::new(session, store, pipeline);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Redis when configured and reachable, otherwise files under `STORAGE_DIR`.
async fn open_store(config: &Config) -> Arc<dyn KeyValueStore> {
    if let Some(url) = &config.redis_url {
        match RedisStore::connect(url).await {
            Ok(store) => {
                info!("Redis store connected");
                return Arc::new(store);
            }
            Err(e) => warn!("Redis unavailable ({e}); falling back to file store"),
        }
    }
    info!("File store at {}", config.storage_dir.display());
    Arc::new(FileStore::new(config.storage_dir.clone()))
}
