//! Conversion of database errors into HTTP errors.
//!
//! Named constraint violations become client errors through the per-table
//! conversions in the sibling modules. Every other failure is logged and
//! reported as a generic internal error.

use forum_postgres::PgError;
use forum_postgres::types::ConstraintViolation;

use crate::handler::{Error, ErrorKind};

/// Tracing target for database failures surfacing in handlers.
const TRACING_TARGET: &str = "forum_server::postgres";

impl From<ConstraintViolation> for Error<'static> {
    fn from(constraint: ConstraintViolation) -> Self {
        match constraint {
            ConstraintViolation::Account(c) => c.into(),
            ConstraintViolation::Post(c) => c.into(),
            ConstraintViolation::Comment(c) => c.into(),
        }
    }
}

impl From<PgError> for Error<'static> {
    fn from(error: PgError) -> Self {
        match error {
            PgError::Config(config_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %config_error,
                    "database configuration error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Timeout(timeout) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    timeout = ?timeout,
                    "database timeout",
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Connection(connection_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %connection_error,
                    "database connection error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Migration(migration_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %migration_error,
                    "database migration error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Query(ref query_error) => {
                if let Some(constraint_name) = error.constraint()
                    && let Some(constraint) = ConstraintViolation::new(constraint_name)
                {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        constraint = constraint_name,
                        error = %query_error,
                        "query error (constraint violation)"
                    );
                    return constraint.into();
                }

                tracing::error!(
                    target: TRACING_TARGET,
                    error = %query_error,
                    "query error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Unexpected(unexpected_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %unexpected_error,
                    "unexpected database error"
                );
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use forum_postgres::error::TimeoutType;
    use forum_postgres::types::{AccountConstraints, CommentConstraints};

    use super::*;

    #[test]
    fn store_failures_are_internal() {
        let errors = [
            PgError::Config("missing url".into()),
            PgError::Timeout(TimeoutType::Wait),
            PgError::Unexpected("boom".into()),
        ];

        for error in errors {
            let error: Error = error.into();
            assert_eq!(error.kind(), ErrorKind::InternalServerError);
        }
    }

    #[test]
    fn constraint_violations_dispatch_per_table() {
        let error: Error =
            ConstraintViolation::Account(AccountConstraints::EmailAddressUnique).into();
        assert_eq!(error.kind(), ErrorKind::Conflict);

        let error: Error = ConstraintViolation::Comment(CommentConstraints::PostReference).into();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }
}
