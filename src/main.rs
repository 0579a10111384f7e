// fragments - server-rendered HTML components
//
// Each component is a serializable struct bound to a template by the
// directory its source file lives in. The server renders full pages on GET /
// and returns single fragments for htmx requests, which swap them in place.
//
// Architecture:
// - Component layer: binding resolution, context building, Renderer
// - Engine: minijinja behind the TemplateEngine trait
// - Components: counter, user table, flow diagram (+ sample data generators)
// - Server (axum): page and fragment routes, static files
// - Config: env > ~/.config/fragments/config.toml > defaults

mod cli;
mod component;
mod components;
mod config;
mod engine;
mod logging;
mod server;
mod startup;

use std::sync::Arc;

use anyhow::{Context, Result};
use component::Renderer;
use config::Config;
use engine::{JinjaEngine, TemplateEngine};
use server::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --edit, --path)
    // If a command was handled, exit early
    if cli::handle_cli() {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env()?;

    // Guard flushes buffered file logs on drop, so it lives until main returns
    let _log_guard = logging::init(&config.logging);

    // Resolve every component's template before serving anything
    let bindings = components::register_all().context("Component registration failed")?;

    let engine: Arc<dyn TemplateEngine> = Arc::new(JinjaEngine::new(&config.template_dir));
    let engine_name = engine.engine_name().to_string();

    let renderer = Arc::new(Renderer::new());
    renderer.set_engine(engine)?;
    renderer
        .check(&bindings)
        .context("Component templates could not be loaded")?;

    let state = AppState::new(renderer, config.demo.clone());

    startup::print_startup(&config, &engine_name, &bindings);
    startup::log_startup(&config, &bindings);

    // Oneshot: the server finishes in-flight requests once this fires
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let server_config = config.clone();
    let mut server_handle = tokio::spawn(async move {
        server::start_server(&server_config, state, shutdown_rx).await
    });

    let server_stopped = tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for Ctrl+C")?;
            false
        }
        // Server stopped on its own, e.g. the address was already in use
        joined = &mut server_handle => {
            joined.context("Server task panicked")??;
            true
        }
    };

    if !server_stopped {
        tracing::info!("Shutting down...");

        // If the send fails, the server has already stopped
        let _ = shutdown_tx.send(());
        server_handle.await.context("Server task panicked")??;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
