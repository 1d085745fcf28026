//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! ```rust,no_run
//! use forum_server::handler::routes;
//! use forum_server::service::{ServiceConfig, ServiceState};
//!
//! # async fn example(config: ServiceConfig) -> anyhow::Result<()> {
//! let state = ServiceState::from_config(&config).await?;
//! let app: axum::Router = routes(state.clone()).with_state(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod accounts;
mod authentication;
mod comments;
mod error;
mod monitors;
mod posts;
pub mod request;
pub mod response;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::ErrorResponse;
use crate::middleware::RouterAuthExt;
use crate::service::ServiceState;

#[inline]
async fn fallback() -> Response {
    ErrorKind::NotFound
        .with_message("Route not found")
        .into_response()
}

/// Returns a [`Router`] with all routes that require a session.
fn private_routes(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .merge(accounts::private_routes())
        .merge(posts::private_routes())
        .merge(comments::routes())
        .with_authentication(state)
}

/// Returns a [`Router`] with all public routes.
fn public_routes() -> Router<ServiceState> {
    Router::new()
        .merge(monitors::routes())
        .merge(authentication::routes())
        .merge(accounts::public_routes())
        .merge(posts::public_routes())
}

/// Returns a [`Router`] with all routes.
pub fn routes(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .merge(private_routes(state))
        .merge(public_routes())
        .fallback(fallback)
}
