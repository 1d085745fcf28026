use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use derive_more::Deref;
use forum_postgres::PgClient;
use forum_postgres::query::AccountRepository;

use super::{AuthClaims, AuthHeader};
use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::SessionKeys;

/// Caller identity with a verified token and an existing account.
///
/// Inserted into the request extensions by the authentication middleware, so
/// handlers behind it extract it without repeating the lookup.
#[derive(Debug, Clone, Deref, PartialEq, Eq)]
pub struct AuthState(pub AuthClaims);

impl AuthState {
    #[inline]
    #[must_use]
    pub const fn from_verified_claims(auth_claims: AuthClaims) -> Self {
        Self(auth_claims)
    }

    /// Confirms that the account named by the token still exists.
    pub async fn from_unverified_header(auth_header: AuthHeader, pg_client: PgClient) -> Result<Self> {
        let auth_claims = auth_header.into_auth_claims();

        let mut conn = pg_client.get_connection().await.map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %e,
                account_id = %auth_claims.account_id,
                "database unavailable during authentication",
            );
            ErrorKind::InternalServerError
                .with_message("Authentication verification is temporarily unavailable")
        })?;

        let account = conn
            .find_account_by_id(auth_claims.account_id)
            .await
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    error = %e,
                    account_id = %auth_claims.account_id,
                    "account lookup failed during authentication",
                );
                ErrorKind::InternalServerError
                    .with_message("Authentication verification encountered an error")
            })?;

        if account.is_none() {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                account_id = %auth_claims.account_id,
                token_id = %auth_claims.token_id,
                "token rejected: account no longer exists",
            );
            return Err(ErrorKind::Unauthorized
                .with_message("Account not found")
                .with_context("The account this token was issued to has been deleted"));
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            account_id = %auth_claims.account_id,
            "caller authenticated",
        );

        Ok(Self::from_verified_claims(auth_claims))
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync + Send + 'static,
    PgClient: FromRef<S>,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(auth_state.clone());
        }

        let auth_header = AuthHeader::from_request_parts(parts, state).await?;
        let pg_client = PgClient::from_ref(state);
        let auth_state = Self::from_unverified_header(auth_header, pg_client).await?;

        parts.extensions.insert(auth_state.clone());
        Ok(auth_state)
    }
}
