use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use axum_extra::typed_header::TypedHeaderRejectionReason;

use super::AuthClaims;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::SessionKeys;

/// Verified claims from the `Authorization: Bearer` header.
///
/// Verification covers the signature, issuer, audience and expiry. Whether the
/// account still exists is checked by [`AuthState`].
///
/// [`AuthState`]: super::AuthState
#[must_use]
#[derive(Debug, Clone)]
pub struct AuthHeader {
    auth_claims: AuthClaims,
}

impl AuthHeader {
    #[inline]
    pub const fn new(auth_claims: AuthClaims) -> Self {
        Self { auth_claims }
    }

    #[inline]
    pub const fn as_auth_claims(&self) -> &AuthClaims {
        &self.auth_claims
    }

    #[inline]
    pub fn into_auth_claims(self) -> AuthClaims {
        self.auth_claims
    }

    fn from_header(
        authorization_header: TypedHeader<Authorization<Bearer>>,
        session_keys: &SessionKeys,
    ) -> Result<Self> {
        let token = authorization_header.token();
        let auth_claims = AuthClaims::from_token(token, session_keys.decoding_key())?;
        Ok(Self::new(auth_claims))
    }
}

impl<S> FromRequestParts<S> for AuthHeader
where
    S: Sync + Send,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_header) = parts.extensions.get::<Self>() {
            return Ok(auth_header.clone());
        }

        type AuthBearerHeader = TypedHeader<Authorization<Bearer>>;
        let session_keys = SessionKeys::from_ref(state);

        match AuthBearerHeader::from_request_parts(parts, state).await {
            Ok(bearer_header) => {
                let auth_header = Self::from_header(bearer_header, &session_keys)?;
                parts.extensions.insert(auth_header.clone());
                Ok(auth_header)
            }
            Err(rejection) => {
                let error = match rejection.reason() {
                    TypedHeaderRejectionReason::Missing => ErrorKind::MissingAuthToken
                        .with_context("Missing Authorization header with Bearer token"),
                    TypedHeaderRejectionReason::Error(_) => ErrorKind::MalformedAuthToken
                        .with_context("Authorization header must contain a Bearer token"),
                    _ => ErrorKind::InternalServerError
                        .with_message("Authentication processing failed")
                        .with_context("Unexpected error during header extraction"),
                };
                Err(error.with_resource("authentication"))
            }
        }
    }
}
