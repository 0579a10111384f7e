// Server module - HTTP surface for the components
//
// GET / renders the full page; POST /increment and /decrement return only
// the counter fragment so the browser can swap it in place.

mod error;
mod handlers;
mod state;

pub use state::AppState;

use std::path::Path;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::Config;

/// Build the router: pages, fragments and static files
pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/increment", post(handlers::increment))
        .route("/decrement", post(handlers::decrement))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(
    config: &Config,
    state: AppState,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> Result<()> {
    let bind_addr = config.bind_addr;
    let app = router(state, &config.static_dir);

    tracing::info!("Starting server on {}", bind_addr);

    let listener = TcpListener::bind(bind_addr)
        .await
        .context("Failed to bind to address")?;

    tracing::info!("Server listening on {}", bind_addr);

    // Stop accepting connections once shutdown_rx fires, finish in-flight requests
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_rx.await.ok();
        })
        .await
        .context("Server error")?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}
