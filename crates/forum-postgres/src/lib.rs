#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Migrations compiled into the binary from `./migrations`.
pub(crate) const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
    diesel_migrations::embed_migrations!("./migrations");

/// Pool construction.
pub const TRACING_TARGET_CLIENT: &str = "forum_postgres::client";
/// Repository queries.
pub const TRACING_TARGET_QUERY: &str = "forum_postgres::queries";
/// Schema migrations.
pub const TRACING_TARGET_MIGRATION: &str = "forum_postgres::migrations";
/// Connection checkout, setup and health.
pub const TRACING_TARGET_CONNECTION: &str = "forum_postgres::connection";

mod client;
pub mod model;
pub mod query;
mod schema;
pub mod types;

use std::borrow::Cow;

use deadpool::managed::TimeoutType;
use diesel::ConnectionError;
use diesel::result::Error;
pub use diesel_async::AsyncPgConnection as PgConnection;

pub use crate::client::{PgClient, PgConfig, PgConn, run_pending_migrations};
use crate::types::ConstraintViolation;

pub mod error {
    //! Re-exports of the driver errors wrapped by [`PgError`].
    //!
    //! [`PgError`]: crate::PgError

    pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

    pub use deadpool::managed::TimeoutType;
    pub use diesel::result::{ConnectionError as DieselConnectionError, Error as DieselError};
    pub use diesel_async::pooled_connection::PoolError as DieselPoolError;
    pub use diesel_async::pooled_connection::deadpool::PoolError as DeadpoolError;
}

/// Failure of a pool, migration or query operation.
#[derive(Debug, thiserror::Error)]
#[must_use = "database errors should be handled appropriately"]
pub enum PgError {
    #[error("invalid database configuration: {0}")]
    Config(String),

    /// Waiting for, creating or recycling a pooled connection took too long.
    #[error("database operation timed out ({0:?})")]
    Timeout(TimeoutType),

    #[error("database connection failed: {0}")]
    Connection(#[from] ConnectionError),

    #[error("database migration failed: {0}")]
    Migration(error::BoxError),

    /// A statement failed; constraint violations are reported through
    /// [`PgError::constraint_violation`].
    #[error("database query failed: {0}")]
    Query(#[from] Error),

    #[error("unexpected database error: {0}")]
    Unexpected(Cow<'static, str>),
}

impl PgError {
    /// Name of the violated constraint, for errors raised by the database.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            PgError::Query(Error::DatabaseError(_, info)) => info.constraint_name(),
            _ => None,
        }
    }

    /// The violated constraint, when it is one this crate knows about.
    pub fn constraint_violation(&self) -> Option<ConstraintViolation> {
        self.constraint().and_then(ConstraintViolation::new)
    }

    /// Whether retrying the same operation later could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PgError::Timeout(_) | PgError::Connection(ConnectionError::BadConnection(_))
        )
    }
}

impl From<error::DeadpoolError> for PgError {
    fn from(value: error::DeadpoolError) -> Self {
        use error::{DeadpoolError, DieselPoolError};

        match value {
            DeadpoolError::Timeout(timeout) => Self::Timeout(timeout),
            DeadpoolError::Backend(DieselPoolError::QueryError(error)) => Self::Query(error),
            DeadpoolError::Backend(DieselPoolError::ConnectionError(error)) => {
                Self::Connection(error)
            }
            DeadpoolError::PostCreateHook(err) => Self::Unexpected(err.to_string().into()),
            DeadpoolError::NoRuntimeSpecified => Self::Unexpected("pool has no runtime".into()),
            DeadpoolError::Closed => Self::Connection(ConnectionError::InvalidConnectionUrl(
                "connection pool is closed".into(),
            )),
        }
    }
}

/// Result of a database operation.
pub type PgResult<T, E = PgError> = Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_are_transient() {
        assert!(PgError::Timeout(TimeoutType::Wait).is_transient());
        assert!(!PgError::Config("missing url".into()).is_transient());
    }

    #[test]
    fn only_database_errors_carry_constraints() {
        let error = PgError::Unexpected("boom".into());
        assert!(error.constraint().is_none());
        assert!(error.constraint_violation().is_none());

        let error = PgError::Query(Error::NotFound);
        assert!(error.constraint().is_none());
    }

    #[test]
    fn closed_pool_is_a_connection_error() {
        let error = PgError::from(error::DeadpoolError::Closed);
        assert!(matches!(error, PgError::Connection(_)));
    }
}
