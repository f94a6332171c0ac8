use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use axum::Router;
use common::env::check_data_file;
use configs::AppConfig;
use models::Movie;
use service::{movies::MovieService, storage::json_array_store::JsonArrayStore};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;

/// Backing file used when `storage.data_file` is not configured: next to the
/// server crate itself.
pub const DEFAULT_DATA_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/biblioteca.json");

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

pub fn data_file(cfg: &AppConfig) -> PathBuf {
    cfg.storage
        .data_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Router over a movie catalog stored in `path`.
pub fn build_app(path: impl Into<PathBuf>) -> Router {
    let store = JsonArrayStore::<Movie>::new(path);
    let state = AppState::new(MovieService::new(Arc::new(store)));
    routes::build_router(state, build_cors())
}

/// Serve the catalog with an already loaded configuration. Logging and
/// `.env` are set up by the caller.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let path = data_file(&cfg);
    check_data_file(&path).await;

    let app = build_app(&path);

    let addr = bind_addr(&cfg)?;
    info!(%addr, data_file = %path.display(), "starting movie catalog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server is running on port {}", cfg.server.port);
    axum::serve(listener, app).await?;
    Ok(())
}
