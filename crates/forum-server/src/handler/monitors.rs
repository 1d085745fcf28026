//! Liveness and health endpoints.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use forum_postgres::PgClient;

use crate::extract::Json;
use crate::handler::response::{MonitorStatus, ServiceStatus};
use crate::service::ServiceState;

/// Tracing target for monitor endpoints.
const TRACING_TARGET: &str = "forum_server::handler::monitors";

/// Plain-text greeting used as a liveness probe.
async fn greeting() -> &'static str {
    "Hola"
}

/// Reports whether the database can hand out a connection.
#[tracing::instrument(skip_all)]
async fn health_status(State(pg_client): State<PgClient>) -> (StatusCode, Json<MonitorStatus>) {
    match pg_client.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(MonitorStatus::new(ServiceStatus::Healthy)),
        ),
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %error,
                "health check failed: database unavailable",
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(MonitorStatus::new(ServiceStatus::Degraded)),
            )
        }
    }
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/", get(greeting))
        .route("/health", get(health_status))
}
