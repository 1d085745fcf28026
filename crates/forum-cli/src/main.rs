#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use forum_server::handler::routes;
use forum_server::middleware::{RouterCorsExt, RouterObservabilityExt, RouterRecoveryExt};
use forum_server::service::ServiceState;

use crate::config::Cli;
use crate::server::ServerError;

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "forum_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "forum_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "forum_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        let message = format!("{error:#}");
        let suggestion = error
            .downcast_ref::<ServerError>()
            .and_then(ServerError::suggestion);
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %message,
            suggestion,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();
    cli.init_tracing();

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting forum server"
    );

    cli.log();
    cli.validate()?;

    let state = ServiceState::from_config(&cli.service)
        .await
        .context("failed to create service state")?;
    let router = create_router(state, &cli);

    server::serve_http(router, cli.server).await?;
    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces timeouts
/// 2. Observability - request IDs and tracing spans
/// 3. CORS
/// 4. Routes (innermost) - authentication and handlers
fn create_router(state: ServiceState, cli: &Cli) -> Router {
    routes(state.clone())
        .with_state(state)
        .with_cors(&cli.middleware.cors)
        .with_observability()
        .with_recovery(cli.server.request_timeout())
}
