use std::time::Instant;

use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use crate::{MIGRATIONS, PgClient, PgError, PgResult, TRACING_TARGET_MIGRATION};

/// Applies the embedded migrations the database has not seen yet and
/// returns the versions that ran, oldest first.
///
/// Idempotent: a migrated database yields an empty list.
#[tracing::instrument(skip(pg), target = TRACING_TARGET_MIGRATION)]
pub async fn run_pending_migrations(pg: &PgClient) -> PgResult<Vec<String>> {
    let started = Instant::now();
    let conn = pg.get_pooled_connection().await?;

    // The harness is synchronous, so the connection moves to a blocking thread.
    let mut conn: AsyncConnectionWrapper<_> = conn.into();
    let applied = spawn_blocking(move || {
        conn.run_pending_migrations(MIGRATIONS).map(|versions| {
            versions
                .into_iter()
                .map(|version| version.to_string())
                .collect::<Vec<_>>()
        })
    })
    .await
    .map_err(|err| PgError::Migration(err.into()))?
    .map_err(|err| {
        tracing::error!(target: TRACING_TARGET_MIGRATION, error = %err, "migration failed");
        PgError::Migration(err)
    })?;

    tracing::info!(
        target: TRACING_TARGET_MIGRATION,
        applied = applied.len(),
        elapsed_ms = started.elapsed().as_millis(),
        "database schema is up to date"
    );

    Ok(applied)
}
