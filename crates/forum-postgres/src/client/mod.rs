//! Pooled Postgres client and schema migrations.

mod hooks;
mod migrations;
mod pg_client;
mod pg_config;

use deadpool::managed::{Object, Pool};
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
pub use migrations::run_pending_migrations;
pub use pg_client::{PgClient, PgConn};
pub use pg_config::PgConfig;

type ConnectionManager = AsyncDieselConnectionManager<AsyncPgConnection>;
pub(crate) type ConnectionPool = Pool<ConnectionManager>;
pub(crate) type PooledConnection = Object<ConnectionManager>;
