use std::time::Instant;

use axum::Router;
use axum::extract::Request;
use axum::http::{HeaderName, header};
use axum::middleware::{Next, from_fn};
use axum::response::Response;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

/// Tracing target for per-request summaries.
const TRACING_TARGET: &str = "forum_server::middleware::requests";

/// Header carrying the request identifier.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extension trait for request tracing.
pub trait RouterObservabilityExt<S> {
    /// Assigns and propagates `x-request-id`, traces every request and keeps
    /// credentials out of the logs.
    fn with_observability(self) -> Self;
}

impl<S> RouterObservabilityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_observability(self) -> Self {
        // Last layer added runs first.
        self.layer(from_fn(log_request))
            .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                REQUEST_ID_HEADER,
            )))
            .layer(SetSensitiveRequestHeadersLayer::new([
                header::AUTHORIZATION,
                header::COOKIE,
            ]))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(
                HeaderName::from_static(REQUEST_ID_HEADER),
                MakeRequestUuid,
            ))
    }
}

/// Logs method, path, status and latency of every request.
pub async fn log_request(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let response = next.run(request).await;
    let status = response.status();
    let duration_ms = start_time.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::warn!(
            target: TRACING_TARGET,
            %method, %path, %status, duration_ms, request_id = request_id.as_deref(),
            "request failed",
        );
    } else {
        tracing::debug!(
            target: TRACING_TARGET,
            %method, %path, %status, duration_ms, request_id = request_id.as_deref(),
            "request completed",
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    #[tokio::test]
    async fn responses_carry_a_request_id() -> anyhow::Result<()> {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .with_observability();
        let server = TestServer::new(app)?;

        let response = server.get("/").await;
        response.assert_status_ok();
        assert!(response
            .maybe_header(HeaderName::from_static(REQUEST_ID_HEADER))
            .is_some());
        Ok(())
    }

    #[tokio::test]
    async fn incoming_request_ids_are_kept() -> anyhow::Result<()> {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .with_observability();
        let server = TestServer::new(app)?;

        let response = server
            .get("/")
            .add_header(
                HeaderName::from_static(REQUEST_ID_HEADER),
                HeaderValue::from_static("req-42"),
            )
            .await;
        let request_id = response.header(HeaderName::from_static(REQUEST_ID_HEADER));
        assert_eq!(request_id, HeaderValue::from_static("req-42"));
        Ok(())
    }
}
