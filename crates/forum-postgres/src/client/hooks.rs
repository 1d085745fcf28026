//! Connection setup and pool hooks.

use std::time::Instant;

use deadpool::managed::{HookResult, Metrics};
use diesel::ConnectionResult;
use diesel_async::pooled_connection::{PoolError, PoolableConnection};
use diesel_async::{AsyncConnection, AsyncPgConnection};
use futures::FutureExt;
use futures::future::BoxFuture;

use crate::{PgConfig, TRACING_TARGET_CONNECTION};

/// Opens a connection and logs the outcome with the password masked.
pub(crate) fn establish<C>(url: &str) -> BoxFuture<'_, ConnectionResult<C>>
where
    C: AsyncConnection + 'static,
{
    async move {
        let started = Instant::now();
        let result = C::establish(url).await;
        let elapsed_ms = started.elapsed().as_millis();

        if let Err(err) = &result {
            tracing::error!(
                target: TRACING_TARGET_CONNECTION,
                url = %PgConfig::mask_url(url),
                elapsed_ms,
                error = %err,
                "could not open a database connection"
            );
        } else {
            tracing::debug!(
                target: TRACING_TARGET_CONNECTION,
                elapsed_ms,
                "database connection opened"
            );
        }

        result
    }
    .boxed()
}

/// Flags connections that came out of creation or recycling already broken.
pub(crate) fn report_broken(
    conn: &mut AsyncPgConnection,
    metrics: &Metrics,
) -> HookResult<PoolError> {
    if conn.is_broken() {
        tracing::warn!(
            target: TRACING_TARGET_CONNECTION,
            age = ?metrics.age(),
            recycle_count = metrics.recycle_count,
            "pooled connection is broken"
        );
    }

    Ok(())
}
